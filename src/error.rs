//! Crate-level error type.

use crate::css::ParseError;
use crate::layout::LayoutError;
use crate::reactive::ReactiveError;
use crate::template::TemplateError;

/// Any failure surfaced by the public API.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error(transparent)]
    Reactive(#[from] ReactiveError),
    /// A write tried to re-run the pipeline while it was already borrowed.
    #[error("layout pipeline is already running")]
    PipelineBusy,
    #[error("clipboard closed before delivering text")]
    ClipboardClosed,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::MeasureError;

    #[test]
    fn sources_convert_and_display() {
        let err: Error = TemplateError::UnknownTag("blink".into()).into();
        assert_eq!(err.to_string(), "unknown tag 'blink'");

        let err: Error = LayoutError::from(MeasureError::MissingAsset { path: "x.png".into() }).into();
        assert_eq!(err.to_string(), "no natural size known for asset 'x.png'");

        let err: Error = ReactiveError::WriteCycle { field: "n".into(), depth: 3 }.into();
        assert_eq!(err.to_string(), "write cycle on 'n' at notification depth 3");

        assert_eq!(Error::PipelineBusy.to_string(), "layout pipeline is already running");
    }
}
