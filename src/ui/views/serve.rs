use std::net::SocketAddr;
use std::path::Path;

use crate::ui::blocks::header::CommandHeader;
use crate::ui::primitives::icon::Icon;

pub fn render_serve_header(
    addr: SocketAddr,
    storage: &Path,
    public_url: Option<&str>,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Serve, "Fractal Registry");
    header.add("Listening", format!("http://{addr}"));
    if let Some(url) = public_url {
        header.add("Public URL", url);
    }
    header.add("Storage", storage.display().to_string());
    header.add("Hint", "Press Ctrl+C to stop");
    header.render(supports_color, supports_unicode)
}
