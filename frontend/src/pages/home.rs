use dioxus::prelude::*;
use crate::Route;

#[component]
pub fn Home() -> Element {
  static CSS: Asset = asset!("/assets/home.css");
  rsx! {
    document::Stylesheet {href: CSS},
    div {
      class: "home-page",
      section {
        class : "hero",
        h1 { "Virtualized Live Market Feed" },
        p { "Watch a thousand-row simulated market feed stream into a windowed list that only ever renders what you can see. Scroll freely while prices, volumes and statuses keep moving underneath." },
        Link {
          class: "cta-button",
          to: Route::Ticker { },
          "Open the Live Board"
        }
      },
      section {
        class: "features",
        div {
          class: "feature-card",
          h3 {
            class: "feature-card-title",
            span {"⚡"}
            "Simulated Streaming"
          }
          p { "A weighted mix of quiet, busy and burst activity patterns mutates a handful of records per tick, so the board feels like a real exchange feed without a single network call." }
        },
        div {
          class: "feature-card",
          h3 {
            class: "feature-card-title",
            span {"🪟"}
            "Windowed Rendering" }
          p { "Only the rows intersecting the viewport are rendered. The visible range is recomputed from the scroll offset on every gesture and clamped so you can never scroll past the end." }
        },
        div {
          class: "feature-card",
          h3 {
            class: "feature-card-title",
            span {"🔌"}
            "Link Simulation"
          }
          p { "A tiny connection state machine occasionally drops the feed and walks a fixed recovery ladder. While the link is down, updates are skipped rather than queued." }
        }
      }
    }
  }
}
