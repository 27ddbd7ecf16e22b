use crate::ui::blocks::header::CommandHeader;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use fractal::application::WatchEvent;

pub fn render_watch_header(
    input: &str,
    output: &str,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Watch, "Fractal Watch");
    header.add("Input", input);
    header.add("Output", output);
    header.add("Hint", "Press Ctrl+C to stop");
    header.render(supports_color, supports_unicode)
}

pub fn render_watch_event(
    timestamp: &str,
    event: &WatchEvent,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let prefix = ColoredText::dim(format!("[{}]", timestamp)).render(supports_color);

    match event {
        WatchEvent::WatchStarted { input, .. } => format!(
            "{} {} Watching: {}\n",
            prefix,
            Icon::Watch.colored(supports_color, supports_unicode),
            input
        ),
        WatchEvent::FileChanged { path } => format!(
            "{} {} Changed: {}\n",
            prefix,
            Icon::Arrow.colored(supports_color, supports_unicode),
            path
        ),
        WatchEvent::BuildStarted => format!(
            "{} {} Building...\n",
            prefix,
            Icon::Progress.colored(supports_color, supports_unicode)
        ),
        WatchEvent::ItemBuilt { name, .. } => format!(
            "{} {} Built: {}\n",
            prefix,
            Icon::Success.colored(supports_color, supports_unicode),
            name
        ),
        WatchEvent::ItemSkipped { path, reason } => format!(
            "{} {} Skipped: {} ({})\n",
            prefix,
            Icon::Skipped.colored(supports_color, supports_unicode),
            path,
            reason
        ),
        WatchEvent::ItemFailed { path, error } => format!(
            "{} {} Failed: {}\n    {}\n",
            prefix,
            Icon::Error.colored(supports_color, supports_unicode),
            path,
            ColoredText::error(error.as_str()).render(supports_color)
        ),
        WatchEvent::BuildComplete {
            built,
            skipped,
            failed,
        } => {
            let icon = if *failed > 0 {
                Icon::Warning
            } else {
                Icon::Success
            }
            .colored(supports_color, supports_unicode);

            if *failed > 0 {
                format!(
                    "{} {} Build: {} built, {} skipped, {} failed\n",
                    prefix, icon, built, skipped, failed
                )
            } else {
                format!(
                    "{} {} Build: {} built, {} skipped\n",
                    prefix, icon, built, skipped
                )
            }
        }
        WatchEvent::Error { message } => format!(
            "{} {} Error: {}\n",
            prefix,
            Icon::Error.colored(supports_color, supports_unicode),
            message
        ),
        WatchEvent::Shutdown => format!(
            "\n{} {} Watch stopped.\n",
            prefix,
            Icon::Watch.colored(supports_color, supports_unicode)
        ),
    }
}
