use farmgate_frontend::{App, init_logging};
use leptos::prelude::*;

pub fn main() {
    console_error_panic_hook::set_once();
    init_logging();
    mount_to_body(App);
}
