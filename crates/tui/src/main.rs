use anyhow::Result;

fn main() -> Result<()> {
    worklens_tui::init_logging();
    worklens_tui::run()
}
