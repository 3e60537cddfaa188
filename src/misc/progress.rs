use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

const TEMPLATE: &str = "{prefix:>12.bold.cyan} [{bar:25}] {pos}/{len}";
const TEMPLATE_NO_COLOR: &str = "{prefix:>12} [{bar:25}] {pos}/{len}";

/// Build the progress bar used for batch resolutions.
///
/// When `enabled` is false (diagnostic logging is active and a bar would
/// interleave with log lines) the bar is hidden but still functional, so
/// callers never have to special-case it.
#[must_use]
pub fn batch_progress(prefix: &str, enabled: bool, use_colors: bool) -> ProgressBar {
    let bar = if enabled {
        ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr())
    } else {
        ProgressBar::hidden()
    };

    let template = if use_colors { TEMPLATE } else { TEMPLATE_NO_COLOR };
    bar.set_style(
        ProgressStyle::default_bar()
            .template(template)
            .expect("could not create progress bar style")
            .progress_chars("=> "),
    );
    bar.set_prefix(prefix.to_string());
    bar
}
