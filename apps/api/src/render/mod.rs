// Document Renderer
// Pure transformation: (ResumeRecord, FormattingOptions) → LaTeX source.
// No I/O and no shared state; safe to call from any number of tasks at once.

pub mod builder;
pub mod escape;
pub mod handlers;
pub mod preamble;
pub mod sections;

use crate::models::formatting::FormattingOptions;
use crate::models::resume::ResumeRecord;
use crate::render::builder::MarkupBuilder;
use crate::render::preamble::render_preamble;
use crate::render::sections::{render_header, SectionKind};

/// Renders a complete LaTeX document.
///
/// Total and deterministic: identical inputs give byte-identical output.
/// Options are interpolated as-is; range checking is the caller's job.
pub fn render(record: &ResumeRecord, options: &FormattingOptions) -> String {
    let mut doc = MarkupBuilder::with_capacity(8 * 1024);
    doc.raw(&render_preamble(options));
    doc.raw(&render_header(&record.personal_info));

    for kind in SectionKind::ORDER {
        if let Some(section) = kind.render(record, options) {
            doc.raw(&section);
        }
    }

    doc.newline().line(r"\end{document}");
    doc.finish()
}
