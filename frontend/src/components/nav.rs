#![allow(non_snake_case)]

use dioxus::prelude::*;
use crate::Route;

#[component]
pub fn NavBar() -> Element {
    static CSS: Asset = asset!("/assets/main.css");

    rsx! {
        document::Stylesheet { href: CSS },
        nav {
            class: "navbar",
            Link { class: "nav-brand", to: Route::Home {}, "LiveTick" },
            div {
                class: "nav-links",
                Link { class: "nav-link", to: Route::Ticker {}, "Live Board" }
            }
        },
        Outlet::<Route> {}
    }
}
