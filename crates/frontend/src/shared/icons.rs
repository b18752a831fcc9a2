use leptos::prelude::*;

/// Path data of a 24×24 stroke icon
fn icon_paths(name: &str) -> &'static [&'static str] {
    match name {
        "plus" => &["M12 5v14", "M5 12h14"],
        "x" => &["M18 6 6 18", "M6 6l12 12"],
        "refresh" => &[
            "M23 4v6h-6",
            "M1 20v-6h6",
            "M3.51 9a9 9 0 0 1 14.85-3.36L23 10",
            "M1 14l4.64 4.36A9 9 0 0 0 20.49 15",
        ],
        "restore" => &["M1 4v6h6", "M3.51 15a9 9 0 1 0 2.13-9.36L1 10"],
        "edit" => &[
            "M11 4H4a2 2 0 0 0-2 2v14a2 2 0 0 0 2 2h14a2 2 0 0 0 2-2v-7",
            "M18.5 2.5a2.12 2.12 0 0 1 3 3L12 15l-4 1 1-4z",
        ],
        "trash" => &[
            "M3 6h18",
            "M19 6l-1 14a2 2 0 0 1-2 2H8a2 2 0 0 1-2-2L5 6",
            "M10 11v6",
            "M14 11v6",
            "M9 6V4a1 1 0 0 1 1-1h4a1 1 0 0 1 1 1v2",
        ],
        "filter" => &["M22 3H2l8 9.46V19l4 2v-8.54z"],
        "search" => &["M11 19a8 8 0 1 0 0-16 8 8 0 0 0 0 16z", "M21 21l-4.35-4.35"],
        "chevron-left" => &["M15 18l-6-6 6-6"],
        "chevron-right" => &["M9 18l6-6-6-6"],
        "chevrons-left" => &["M11 17l-5-5 5-5", "M18 17l-5-5 5-5"],
        "chevrons-right" => &["M13 17l5-5-5-5", "M6 17l5-5-5-5"],
        "purchases" => &[
            "M9 22a1 1 0 1 0 0-2 1 1 0 0 0 0 2z",
            "M20 22a1 1 0 1 0 0-2 1 1 0 0 0 0 2z",
            "M1 1h4l2.68 12.39a2 2 0 0 0 2 1.61h7.72a2 2 0 0 0 2-1.61L23 6H6",
        ],
        "deliveries" => &[
            "M1 3h15v13H1z",
            "M16 8h4l3 3v5h-7z",
            "M5.5 21a2.5 2.5 0 1 0 0-5 2.5 2.5 0 0 0 0 5z",
            "M18.5 21a2.5 2.5 0 1 0 0-5 2.5 2.5 0 0 0 0 5z",
        ],
        "disposals" => &["M3 6h18", "M19 6l-1 14H6L5 6", "M9 6V3h6v3"],
        "productions" => &[
            "M2 20h20",
            "M4 20V10l5 3V10l5 3V6l6 4v10",
        ],
        "stock-movements" => &[
            "M17 1l4 4-4 4",
            "M3 11V9a4 4 0 0 1 4-4h14",
            "M7 23l-4-4 4-4",
            "M21 13v2a4 4 0 0 1-4 4H3",
        ],
        "users" => &[
            "M17 21v-2a4 4 0 0 0-4-4H5a4 4 0 0 0-4 4v2",
            "M9 11a4 4 0 1 0 0-8 4 4 0 0 0 0 8z",
            "M23 21v-2a4 4 0 0 0-3-3.87",
            "M16 3.13a4 4 0 0 1 0 7.75",
        ],
        "logout" => &["M9 21H5a2 2 0 0 1-2-2V5a2 2 0 0 1 2-2h4", "M16 17l5-5-5-5", "M21 12H9"],
        // неизвестное имя - часы
        _ => &["M12 22a10 10 0 1 0 0-20 10 10 0 0 0 0 20z", "M12 6v6l4 2"],
    }
}

pub fn icon(name: &str) -> AnyView {
    let paths = icon_paths(name);
    view! {
        <svg width="18" height="18" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" aria-hidden="true">
            {paths.iter().map(|d| view! { <path d=*d /> }).collect_view()}
        </svg>
    }
    .into_any()
}
