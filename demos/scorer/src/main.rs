use reprise_term::run_terminal_app;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    run_terminal_app(scorer::app)
}
