use anyhow::Result;
use picsum_lib::types::{ImageSize, Photo};
use picsum_lib::{Client, PhotoDetail};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

impl OutputFormat {
    /// Unknown names fall back to a table.
    pub fn parse(name: &str) -> Self {
        match name {
            "json" => OutputFormat::Json,
            "csv" => OutputFormat::Csv,
            "markdown" | "md" => OutputFormat::Markdown,
            _ => OutputFormat::Table,
        }
    }
}

#[derive(Tabled, Serialize)]
struct PhotoRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "Author")]
    #[serde(rename = "Author")]
    author: String,
    #[tabled(rename = "Size")]
    #[serde(rename = "Size")]
    size: String,
    #[tabled(rename = "Thumbnail")]
    #[serde(rename = "Thumbnail")]
    thumbnail: String,
}

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "Field")]
    field: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

// -- Row builders --

fn build_photo_rows(photos: &[Photo], client: &Client) -> Vec<PhotoRow> {
    let card = ImageSize::CARD;
    photos
        .iter()
        .map(|p| PhotoRow {
            id: p.id.clone(),
            author: p.author.clone(),
            size: p.size().to_string(),
            thumbnail: client.thumbnail_url(&p.id, card.width, card.height),
        })
        .collect()
}

fn build_detail_rows(detail: &PhotoDetail) -> Vec<FieldRow> {
    vec![
        FieldRow {
            field: "Author",
            value: detail.author.clone(),
        },
        FieldRow {
            field: "Photo ID",
            value: detail.id.clone(),
        },
        FieldRow {
            field: "Dimensions",
            value: detail.dimensions.clone(),
        },
        FieldRow {
            field: "Image",
            value: detail.image_url.clone(),
        },
        FieldRow {
            field: "Source",
            value: detail.source_url.clone(),
        },
        FieldRow {
            field: "Download",
            value: detail.download_url.clone(),
        },
    ]
}

// -- Table output --

pub fn print_photos_table(photos: &[Photo], client: &Client) {
    println!("{}", Table::new(build_photo_rows(photos, client)));
}

pub fn print_detail_table(detail: &PhotoDetail) {
    println!("{}", Table::new(build_detail_rows(detail)));
    println!("\n{}", detail.description);
}

// -- Markdown output --

pub fn print_photos_markdown(photos: &[Photo], client: &Client) {
    let mut table = Table::new(build_photo_rows(photos, client));
    table.with(Style::markdown());
    println!("{}", table);
}

pub fn print_detail_markdown(detail: &PhotoDetail) {
    let mut table = Table::new(build_detail_rows(detail));
    table.with(Style::markdown());
    println!("# {}\n\n{}\n\n{}", detail.author, table, detail.description);
}

// -- CSV output --

pub fn print_photos_csv(photos: &[Photo], client: &Client) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for row in build_photo_rows(photos, client) {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_photos_fixture() -> Vec<Photo> {
        let json_str = include_str!("../../picsum_api/tests/fixtures/list_page1.json");
        serde_json::from_str(json_str).unwrap()
    }

    fn load_detail_fixture() -> PhotoDetail {
        let json_str = include_str!("../../picsum_api/tests/fixtures/photo_237.json");
        let photo: Photo = serde_json::from_str(json_str).unwrap();
        PhotoDetail::new(&photo, &Client::new())
    }

    fn csv_from_rows<T: Serialize>(rows: &[T]) -> String {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        for row in rows {
            wtr.serialize(row).unwrap();
        }
        wtr.flush().unwrap();
        String::from_utf8(wtr.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse("json"), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("csv"), OutputFormat::Csv);
        assert_eq!(OutputFormat::parse("md"), OutputFormat::Markdown);
        assert_eq!(OutputFormat::parse("xml"), OutputFormat::Table);
    }

    #[test]
    fn test_build_photo_rows_mapping() {
        let photos = load_photos_fixture();
        let rows = build_photo_rows(&photos, &Client::new());
        assert_eq!(rows.len(), 3);

        let row = &rows[2];
        assert_eq!(row.id, "10");
        assert_eq!(row.author, "Paul Jarvis");
        assert_eq!(row.size, "2500 × 1667");
        assert_eq!(row.thumbnail, "https://picsum.photos/id/10/600/750");
    }

    #[test]
    fn test_build_photo_rows_empty() {
        let rows = build_photo_rows(&[], &Client::new());
        assert!(rows.is_empty());
    }

    #[test]
    fn test_build_detail_rows() {
        let rows = build_detail_rows(&load_detail_fixture());
        let fields: Vec<&str> = rows.iter().map(|r| r.field).collect();
        assert_eq!(
            fields,
            vec!["Author", "Photo ID", "Dimensions", "Image", "Source", "Download"]
        );
        assert_eq!(rows[2].value, "3500 × 2095");
        assert_eq!(rows[3].value, "https://picsum.photos/id/237/1400/900");
    }

    #[test]
    fn test_csv_photos_headers() {
        let rows = build_photo_rows(&load_photos_fixture(), &Client::new());
        let csv = csv_from_rows(&rows);
        let header = csv.lines().next().unwrap();
        assert_eq!(header, "ID,Author,Size,Thumbnail");
        assert_eq!(csv.lines().count(), 4);
    }

    #[test]
    fn test_json_photos_keep_catalog_field_names() {
        let photos = load_photos_fixture();
        let val = serde_json::to_value(&photos).unwrap();
        assert_eq!(val.as_array().unwrap().len(), 3);
        assert_eq!(val[0]["download_url"], "https://picsum.photos/id/0/5000/3333");
    }

    #[test]
    fn test_markdown_photos_structure() {
        let rows = build_photo_rows(&load_photos_fixture(), &Client::new());
        let mut table = Table::new(&rows);
        table.with(Style::markdown());
        let md = table.to_string();

        assert!(md.contains('|'));
        assert!(md.contains("---"));
        let header_line = md.lines().next().unwrap();
        assert!(header_line.contains("Author"));
        assert!(header_line.contains("Thumbnail"));
    }
}
