//! Inline line icons.
//!
//! Path data from the Lucide set (24×24 viewBox, stroke-based), rendered as
//! inner markup of a sized `<svg>`.

#[cfg(test)]
#[path = "icons_test.rs"]
mod icons_test;

use leptos::prelude::*;
use workflow::palette::Icon;

#[must_use]
pub fn icon_markup(icon: Icon) -> &'static str {
    match icon {
        Icon::Bot => concat!(
            r#"<path d="M12 8V4H8"/><rect width="16" height="12" x="4" y="8" rx="2"/>"#,
            r#"<path d="M2 14h2"/><path d="M20 14h2"/><path d="M15 13v2"/><path d="M9 13v2"/>"#,
        ),
        Icon::MessageSquare => r#"<path d="M21 15a2 2 0 0 1-2 2H7l-4 4V5a2 2 0 0 1 2-2h14a2 2 0 0 1 2 2z"/>"#,
        Icon::Brain => concat!(
            r#"<path d="M12 5a3 3 0 1 0-5.997.125 4 4 0 0 0-2.526 5.77 4 4 0 0 0 .556 6.588A4 4 0 1 0 12 18Z"/>"#,
            r#"<path d="M12 5a3 3 0 1 1 5.997.125 4 4 0 0 1 2.526 5.77 4 4 0 0 1-.556 6.588A4 4 0 1 1 12 18Z"/>"#,
            r#"<path d="M12 5v13"/>"#,
        ),
        Icon::FileText => concat!(
            r#"<path d="M15 2H6a2 2 0 0 0-2 2v16a2 2 0 0 0 2 2h12a2 2 0 0 0 2-2V7Z"/>"#,
            r#"<path d="M14 2v4a2 2 0 0 0 2 2h4"/><path d="M10 9H8"/><path d="M16 13H8"/><path d="M16 17H8"/>"#,
        ),
        Icon::Settings => concat!(
            r#"<path d="M12.22 2h-.44a2 2 0 0 0-2 2v.18a2 2 0 0 1-1 1.73l-.43.25a2 2 0 0 1-2 0l-.15-.08"#,
            r#"a2 2 0 0 0-2.73.73l-.22.38a2 2 0 0 0 .73 2.73l.15.1a2 2 0 0 1 1 1.72v.51a2 2 0 0 1-1 1.74"#,
            r#"l-.15.09a2 2 0 0 0-.73 2.73l.22.38a2 2 0 0 0 2.73.73l.15-.08a2 2 0 0 1 2 0l.43.25a2 2 0 0 1 1 1.73"#,
            r#"V20a2 2 0 0 0 2 2h.44a2 2 0 0 0 2-2v-.18a2 2 0 0 1 1-1.73l.43-.25a2 2 0 0 1 2 0l.15.08"#,
            r#"a2 2 0 0 0 2.73-.73l.22-.39a2 2 0 0 0-.73-2.73l-.15-.08a2 2 0 0 1-1-1.74v-.5a2 2 0 0 1 1-1.74"#,
            r#"l.15-.09a2 2 0 0 0 .73-2.73l-.22-.38a2 2 0 0 0-2.73-.73l-.15.08a2 2 0 0 1-2 0l-.43-.25"#,
            r#"a2 2 0 0 1-1-1.73V4a2 2 0 0 0-2-2z"/><circle cx="12" cy="12" r="3"/>"#,
        ),
        Icon::Database => concat!(
            r#"<ellipse cx="12" cy="5" rx="9" ry="3"/><path d="M3 5V19A9 3 0 0 0 21 19V5"/>"#,
            r#"<path d="M3 12A9 3 0 0 0 21 12"/>"#,
        ),
        Icon::Code => r#"<polyline points="16 18 22 12 16 6"/><polyline points="8 6 2 12 8 18"/>"#,
        Icon::Play => r#"<polygon points="6 3 20 12 6 21 6 3"/>"#,
        Icon::Users => concat!(
            r#"<path d="M16 21v-2a4 4 0 0 0-4-4H6a4 4 0 0 0-4 4v2"/><circle cx="9" cy="7" r="4"/>"#,
            r#"<path d="M22 21v-2a4 4 0 0 0-3-3.87"/><path d="M16 3.13a4 4 0 0 1 0 7.75"/>"#,
        ),
        Icon::Mail => concat!(
            r#"<rect width="20" height="16" x="2" y="4" rx="2"/>"#,
            r#"<path d="m22 7-8.97 5.7a1.94 1.94 0 0 1-2.06 0L2 7"/>"#,
        ),
        Icon::Mic => concat!(
            r#"<path d="M12 2a3 3 0 0 0-3 3v7a3 3 0 0 0 6 0V5a3 3 0 0 0-3-3Z"/>"#,
            r#"<path d="M19 10v2a7 7 0 0 1-14 0v-2"/><line x1="12" x2="12" y1="19" y2="22"/>"#,
        ),
        Icon::Video => concat!(
            r#"<path d="m16 13 5.223 3.482a.5.5 0 0 0 .777-.416V7.87a.5.5 0 0 0-.752-.432L16 10.5"/>"#,
            r#"<rect x="2" y="6" width="14" height="12" rx="2"/>"#,
        ),
        Icon::FileSpreadsheet => concat!(
            r#"<path d="M15 2H6a2 2 0 0 0-2 2v16a2 2 0 0 0 2 2h12a2 2 0 0 0 2-2V7Z"/>"#,
            r#"<path d="M14 2v4a2 2 0 0 0 2 2h4"/><path d="M8 13h2"/><path d="M14 13h2"/>"#,
            r#"<path d="M8 17h2"/><path d="M14 17h2"/>"#,
        ),
        Icon::Workflow => concat!(
            r#"<rect width="8" height="8" x="3" y="3" rx="2"/><path d="M7 11v4a2 2 0 0 0 2 2h4"/>"#,
            r#"<rect width="8" height="8" x="13" y="13" rx="2"/>"#,
        ),
        Icon::ArrowDown => r#"<path d="M12 5v14"/><path d="m19 12-7 7-7-7"/>"#,
    }
}

/// A stroked 24×24 icon scaled by `class` (e.g. `w-6 h-6 text-pink-600`).
#[component]
pub fn IconSvg(icon: Icon, #[prop(into)] class: String) -> impl IntoView {
    view! {
        <svg
            class=class
            xmlns="http://www.w3.org/2000/svg"
            viewBox="0 0 24 24"
            fill="none"
            stroke="currentColor"
            stroke-width="2"
            stroke-linecap="round"
            stroke-linejoin="round"
            aria-hidden="true"
            inner_html=icon_markup(icon)
        ></svg>
    }
}
