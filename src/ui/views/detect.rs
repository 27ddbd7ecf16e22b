use std::path::{Path, PathBuf};

use fractal::ArtifactIdentity;

use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

pub fn render_detect_list(
    input: &Path,
    found: &[(PathBuf, Option<ArtifactIdentity>)],
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut out = format!(
        "{} {} fractal source{} in {}\n",
        Icon::Detect.colored(supports_color, supports_unicode),
        found.len(),
        if found.len() == 1 { "" } else { "s" },
        input.display()
    );

    for (path, identity) in found {
        let relative = path.strip_prefix(input).unwrap_or(path);
        match identity {
            Some(identity) => out.push_str(&format!(
                "  {} {} {}\n",
                Icon::Success.colored(supports_color, supports_unicode),
                relative.display(),
                ColoredText::info(identity.to_string()).render(supports_color)
            )),
            None => out.push_str(&format!(
                "  {} {} {}\n",
                Icon::Skipped.colored(supports_color, supports_unicode),
                relative.display(),
                ColoredText::dim("(no package.json)").render(supports_color)
            )),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_identities_relative_to_input() {
        let found = vec![
            (
                PathBuf::from("app/src/StatsCard.tsx"),
                Some(ArtifactIdentity::new("@acme/widgets", "StatsCard.tsx", "1.2.0")),
            ),
            (PathBuf::from("app/loose/Orphan.jsx"), None),
        ];

        let rendered = render_detect_list(Path::new("app"), &found, false, false);
        assert!(rendered.starts_with("[DETECT] 2 fractal sources in app\n"));
        assert!(rendered.contains(&format!(
            "[OK] {} {}",
            Path::new("src/StatsCard.tsx").display(),
            ArtifactIdentity::new("@acme/widgets", "StatsCard.tsx", "1.2.0")
        )));
        assert!(rendered.contains("(no package.json)"));
    }
}
