use super::*;

const ALL: [Icon; 15] = [
    Icon::Bot,
    Icon::MessageSquare,
    Icon::Brain,
    Icon::FileText,
    Icon::Settings,
    Icon::Database,
    Icon::Code,
    Icon::Play,
    Icon::Users,
    Icon::Mail,
    Icon::Mic,
    Icon::Video,
    Icon::FileSpreadsheet,
    Icon::Workflow,
    Icon::ArrowDown,
];

#[test]
fn every_icon_has_self_closing_shapes() {
    for icon in ALL {
        let markup = icon_markup(icon);
        assert!(markup.starts_with('<'), "{icon:?}");
        assert!(markup.ends_with("/>"), "{icon:?}");
        assert!(!markup.contains("<svg"), "{icon:?} must be inner markup only");
    }
}

#[test]
fn settings_path_is_one_element() {
    let markup = icon_markup(Icon::Settings);
    assert_eq!(markup.matches("<path").count(), 1);
    assert_eq!(markup.matches("<circle").count(), 1);
}
