use indicatif::ProgressStyle;
use tracing::Span;
use tracing_indicatif::span_ext::IndicatifSpanExt;

pub fn progress_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise} / {eta_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}")
        .map(|style| style.progress_chars("##-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
}

/// Renders `span` as a progress bar of `len` steps while it is entered.
/// Does nothing unless an `IndicatifLayer` is installed.
pub fn progress_bar(span: &Span, len: u64, msg: &str) {
    span.pb_set_style(&progress_style());
    span.pb_set_length(len);
    span.pb_set_message(msg);
}
