use dioxus::prelude::*;

use ui::InvoicerApp;

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Title { "Invoicer" }
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        InvoicerApp {}
    }
}
