//! Downloads: a user's experiences as CSV and a user's profile as PDF.

use csv::Writer;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};
use thiserror::Error;

use crate::model::{Experience, User};

/// Header row, in column order.
pub const EXPERIENCE_COLUMNS: [&str; 7] = [
    "role",
    "company",
    "startDate",
    "endDate",
    "description",
    "area",
    "image",
];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to flush CSV writer: {0}")]
    Flush(String),

    #[error("Failed to render PDF: {0}")]
    Pdf(String),
}

/// Renders experiences as CSV with a header row. An ongoing experience has an empty
/// `endDate`.
pub fn experiences_csv(experiences: &[Experience]) -> Result<Vec<u8>, ExportError> {
    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record(EXPERIENCE_COLUMNS)?;

    for experience in experiences {
        let start = experience.start_date.to_string();
        let end = experience
            .end_date
            .map(|date| date.to_string())
            .unwrap_or_default();
        writer.write_record([
            experience.role.as_str(),
            experience.company.as_str(),
            start.as_str(),
            end.as_str(),
            experience.description.as_str(),
            experience.area.as_str(),
            experience.image.as_str(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| ExportError::Flush(e.error().to_string()))
}

const PAGE_WIDTH: Mm = Mm(210.0);
const PAGE_HEIGHT: Mm = Mm(297.0);
const MARGIN: f32 = 20.0;
const LINE_HEIGHT: f32 = 7.0;
/// Characters per body line at 11pt Helvetica within the margins.
const WRAP_AT: usize = 90;

/// Renders a one-page A4 profile: title as the heading, then name, email, picture
/// link and bio.
pub fn user_pdf(user: &User) -> Result<Vec<u8>, ExportError> {
    let (doc, page, layer) = PdfDocument::new(
        format!("{} {}", user.name, user.surname),
        PAGE_WIDTH,
        PAGE_HEIGHT,
        "Profile",
    );
    let heading = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    let body = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;

    let mut cursor = Cursor {
        layer: doc.get_page(page).get_layer(layer),
        y: PAGE_HEIGHT.0 - MARGIN,
    };
    cursor.line(&user.title, 18.0, &heading);
    cursor.skip();
    cursor.line(&format!("{} {}", user.name, user.surname), 13.0, &body);
    cursor.line(&user.email, 11.0, &body);
    cursor.line(&format!("Picture: {}", user.image), 11.0, &body);
    cursor.skip();
    for line in wrap(&user.bio, WRAP_AT) {
        cursor.line(&line, 11.0, &body);
    }

    doc.save_to_bytes()
        .map_err(|e| ExportError::Pdf(e.to_string()))
}

/// Writes lines top to bottom, stopping at the bottom margin.
struct Cursor {
    layer: PdfLayerReference,
    y: f32,
}

impl Cursor {
    fn line(&mut self, text: &str, size: f32, font: &IndirectFontRef) {
        if self.y < MARGIN {
            return;
        }
        self.layer.use_text(text, size, Mm(MARGIN), Mm(self.y), font);
        self.y -= LINE_HEIGHT;
    }

    fn skip(&mut self) {
        self.y -= LINE_HEIGHT;
    }
}

/// Greedy word wrap. Words longer than `width` get a line of their own.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
