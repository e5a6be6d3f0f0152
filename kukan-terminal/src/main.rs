/// Kukan Terminal Viewer
///
/// Hosts the trilingual geometry viewer in an ANSI terminal.
/// Controls:
///   - 1/2/3: Switch section (welcome, geometry, physics)
///   - M / T / U: Cycle script mode, theme, unit system
///   - Tab: Toggle the section menu
///   - C: Step keyboard focus through the fact cards
///   - Mouse: Parallax over the viewports, hover over the cards
///   - Q: Quit (ESC closes the menu first)

use anyhow::Context;
use kukan_core::config;
use kukan_terminal::TerminalApp;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = config::load_default().context("loading viewer configuration")?;

    let mut app = TerminalApp::new(config).context("initializing terminal")?;
    app.run().context("running terminal viewer")?;

    Ok(())
}
