mod command;
mod loader;
mod render;
mod schema;
mod util;

fn main() -> anyhow::Result<()> {
    command::run()
}
