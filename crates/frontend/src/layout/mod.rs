pub mod left;
pub mod top_header;

use leptos::prelude::*;
use left::Navbar;
use top_header::TopHeader;

/// Main application shell.
///
/// ```text
/// +------------------------------------------+
/// |              TopHeader                    |
/// +------------------------------------------+
/// |  Navbar   |           Content            |
/// +------------------------------------------+
/// ```
#[component]
pub fn Shell(children: Children) -> impl IntoView {
    let left_open = RwSignal::new(true);

    view! {
        <div class="app-layout">
            <TopHeader left_open=left_open />

            <div class="app-body">
                <div data-zone="left" class="left" class:hidden=move || !left_open.get()>
                    <Navbar />
                </div>

                <div data-zone="center" class="app-main">
                    {children()}
                </div>
            </div>
        </div>
    }
}
