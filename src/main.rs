mod app;
mod bridge;
mod form;
mod ui;
mod utils;

use app::App;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        leptos::logging::warn!("logger not installed: {e}");
    }
    leptos::mount::mount_to_body(App);
}
