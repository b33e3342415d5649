use gyre::App;

fn main() -> gyre::Result<()> {
    env_logger::init();
    App::new().with_title("Gyre").run()
}
