use scraper::{ElementRef, Html, Selector};
use tokio::task::spawn_blocking;

use crate::config::Config;
use crate::record::{GameRecord, FIELD_COUNT};
use crate::{Error, Result};

const TABLE_SELECTOR: &str = "div#generalBody table";

/// The listing columns a `GameRecord` is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Rank,
    Game,
    Platform,
    Publisher,
    Developer,
    VgchartzScore,
    CriticScore,
    UserScore,
    TotalShipped,
    TotalSales,
    NorthAmericaSales,
    PalSales,
    JapanSales,
    OtherSales,
    ReleaseDate,
    LastUpdate,
}

impl Column {
    pub const ALL: [Column; FIELD_COUNT] = [
        Column::Rank,
        Column::Game,
        Column::Platform,
        Column::Publisher,
        Column::Developer,
        Column::VgchartzScore,
        Column::CriticScore,
        Column::UserScore,
        Column::TotalShipped,
        Column::TotalSales,
        Column::NorthAmericaSales,
        Column::PalSales,
        Column::JapanSales,
        Column::OtherSales,
        Column::ReleaseDate,
        Column::LastUpdate,
    ];

    /// Heading text of the column on the site.
    pub fn label(self) -> &'static str {
        match self {
            Column::Rank => "Pos",
            Column::Game => "Game",
            Column::Platform => "Console",
            Column::Publisher => "Publisher",
            Column::Developer => "Developer",
            Column::VgchartzScore => "VGChartz Score",
            Column::CriticScore => "Critic Score",
            Column::UserScore => "User Score",
            Column::TotalShipped => "Total Shipped",
            Column::TotalSales => "Total Sales",
            Column::NorthAmericaSales => "NA Sales",
            Column::PalSales => "PAL Sales",
            Column::JapanSales => "Japan Sales",
            Column::OtherSales => "Other Sales",
            Column::ReleaseDate => "Release Date",
            Column::LastUpdate => "Last Update",
        }
    }

    // Cell 1 holds the box art and is never read.
    fn position(self) -> usize {
        match self {
            Column::Rank => 0,
            other => other as usize + 1,
        }
    }
}

/// Cell index of every column within a data row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    indices: [usize; FIELD_COUNT],
}

impl ColumnMap {
    /// The fixed layout of the site: rank, box art, title, platform, then one column per field.
    pub fn positional() -> Self {
        Self {
            indices: Column::ALL.map(Column::position),
        }
    }

    /// Resolves every column by its heading. `headings` holds `(text, colspan)` per header cell.
    /// A heading spanning several cells addresses the last of them.
    pub fn from_headings<S: AsRef<str>>(headings: &[(S, usize)]) -> Result<Self> {
        let mut resolved = Vec::with_capacity(headings.len());
        let mut next_cell = 0;
        for (text, span) in headings {
            let span = (*span).max(1);
            next_cell += span;
            resolved.push((normalize_label(text.as_ref()), next_cell - 1));
        }

        let mut indices = [0; FIELD_COUNT];
        for (slot, column) in indices.iter_mut().zip(Column::ALL) {
            let wanted = normalize_label(column.label());
            *slot = resolved
                .iter()
                .find(|(label, _)| *label == wanted)
                .map(|(_, idx)| *idx)
                .ok_or(Error::MissingColumn(column.label()))?;
        }
        Ok(Self { indices })
    }

    pub fn index(&self, column: Column) -> usize {
        self.indices[column as usize]
    }

    /// Minimum number of cells a data row needs.
    pub fn required_cells(&self) -> usize {
        self.indices.iter().max().map_or(0, |max| max + 1)
    }
}

/// Maps the rows of one listing table to records.
pub struct RowMapper {
    columns: ColumnMap,
    link_selector: Selector,
    image_selector: Selector,
}

impl RowMapper {
    pub fn new(columns: ColumnMap) -> Result<Self> {
        Ok(Self {
            columns,
            link_selector: create_selector("a")?,
            image_selector: create_selector("img")?,
        })
    }

    /// Skips the first `skip` rows by position and maps every remaining one.
    pub fn map_rows(&self, rows: &[ElementRef], skip: usize) -> Result<Vec<GameRecord>> {
        rows.iter()
            .enumerate()
            .skip(skip)
            .map(|(idx, row)| self.map_row(idx, *row))
            .collect()
    }

    fn map_row(&self, row_idx: usize, row: ElementRef) -> Result<GameRecord> {
        let cells = child_elements(row, &["td"]);
        let needed = self.columns.required_cells();
        if cells.len() < needed {
            return Err(Error::RowTooShort {
                row: row_idx,
                cells: cells.len(),
                needed,
            });
        }

        let cell = |column: Column| cells[self.columns.index(column)];
        let text = |column: Column| element_text(cell(column));

        let game = cell(Column::Game)
            .select(&self.link_selector)
            .next()
            .map(element_text)
            .ok_or(Error::MissingElement {
                row: row_idx,
                column: Column::Game.label(),
                element: "link",
            })?;
        let platform = cell(Column::Platform)
            .select(&self.image_selector)
            .next()
            .and_then(|img| img.value().attr("alt"))
            .map(|alt| alt.trim().to_string())
            .ok_or(Error::MissingElement {
                row: row_idx,
                column: Column::Platform.label(),
                element: "image alt text",
            })?;

        Ok(GameRecord {
            rank: text(Column::Rank),
            game,
            platform,
            publisher: text(Column::Publisher),
            developer: text(Column::Developer),
            vgchartz_score: text(Column::VgchartzScore),
            critic_score: text(Column::CriticScore),
            user_score: text(Column::UserScore),
            total_shipped: text(Column::TotalShipped),
            total_sales: text(Column::TotalSales),
            north_america_sales: text(Column::NorthAmericaSales),
            pal_sales: text(Column::PalSales),
            japan_sales: text(Column::JapanSales),
            other_sales: text(Column::OtherSales),
            release_date: text(Column::ReleaseDate),
            last_update_date: text(Column::LastUpdate),
        })
    }
}

/// Parses a fetched page on the blocking pool.
pub async fn parse_page(html: String, config: &Config) -> Result<Vec<GameRecord>> {
    let header_rows = config.header_rows;
    let check_header = config.check_header;
    spawn_blocking(move || map_page(&html, header_rows, check_header)).await?
}

/// Extracts the records of one listing page.
/// The first `header_rows` rows of the table are skipped. With `check_header` the column
/// layout is read from the header row among them, otherwise the positional layout is used.
pub fn map_page(html: &str, header_rows: usize, check_header: bool) -> Result<Vec<GameRecord>> {
    let doc = Html::parse_document(html);
    let table_selector = create_selector(TABLE_SELECTOR)?;
    let table = doc
        .select(&table_selector)
        .next()
        .ok_or_else(|| Error::MissingTable(TABLE_SELECTOR.into()))?;

    let rows = table_rows(table);
    let columns = if check_header {
        read_header(&rows[..header_rows.min(rows.len())])?
    } else {
        ColumnMap::positional()
    };

    RowMapper::new(columns)?.map_rows(&rows, header_rows)
}

/// Finds the last of the leading rows that carries the rank heading and resolves the layout from it.
fn read_header(leading_rows: &[ElementRef]) -> Result<ColumnMap> {
    let rank_label = normalize_label(Column::Rank.label());
    let headings = leading_rows
        .iter()
        .rev()
        .map(|row| {
            child_elements(*row, &["th", "td"])
                .into_iter()
                .map(|cell| {
                    let span = cell
                        .value()
                        .attr("colspan")
                        .and_then(|s| s.trim().parse::<usize>().ok())
                        .unwrap_or(1);
                    (element_text(cell), span)
                })
                .collect::<Vec<_>>()
        })
        .find(|headings| {
            headings
                .iter()
                .any(|(text, _)| normalize_label(text) == rank_label)
        })
        .ok_or(Error::HeaderRowNotFound {
            label: Column::Rank.label(),
            rows: leading_rows.len(),
        })?;

    ColumnMap::from_headings(&headings)
}

/// Rows of a table, looking through `thead`/`tbody`/`tfoot` but not into nested tables.
fn table_rows(table: ElementRef) -> Vec<ElementRef> {
    let mut rows = Vec::new();
    for child in table.children().filter_map(ElementRef::wrap) {
        match child.value().name() {
            "tr" => rows.push(child),
            "thead" | "tbody" | "tfoot" => rows.extend(child_elements(child, &["tr"])),
            _ => {}
        }
    }
    rows
}

fn child_elements<'a>(parent: ElementRef<'a>, names: &[&str]) -> Vec<ElementRef<'a>> {
    parent
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|el| names.contains(&el.value().name()))
        .collect()
}

#[inline]
fn element_text(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

#[inline]
fn normalize_label(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[inline]
fn create_selector(sel_str: &str) -> Result<Selector> {
    Selector::parse(sel_str).map_err(|_| Error::ParseMissingSelector(sel_str.into()))
}
