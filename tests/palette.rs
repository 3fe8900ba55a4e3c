#[cfg(test)]
mod tests {
    use calsum::libs::error::{MappingKind, ReportError};
    use calsum::libs::palette::{ColorMap, LabelMap, LabelResolution, Palette, DEFAULT_COLOR_NAME, GOOGLE_COLOR_NAMES};

    fn palette() -> Palette {
        Palette::from_config(&GOOGLE_COLOR_NAMES, &["", "Meetings", "Deep work"])
    }

    #[test]
    fn test_color_map_is_one_based() {
        let colors = ColorMap::from_names(&GOOGLE_COLOR_NAMES);
        assert_eq!(colors.len(), 12);
        assert_eq!(colors.color_name("0"), Some(DEFAULT_COLOR_NAME));
        assert_eq!(colors.color_name("1"), Some("Lavender"));
        assert_eq!(colors.color_name("11"), Some("Tomato"));
        assert_eq!(colors.color_name("12"), None);
        assert_eq!(colors.tag_for("Grape"), Some("3"));
    }

    #[test]
    fn test_label_map_pairs_by_position() {
        let labels = LabelMap::from_pairs(&["Sage", "Grape", "Banana"], &["Meetings", " Deep work "]);
        assert_eq!(labels.label("Sage"), Some("Meetings"));
        assert_eq!(labels.label("Grape"), Some("Deep work"));
        assert_eq!(labels.label("Banana"), None);
        assert_eq!(labels.label("Tomato"), None);
        assert_eq!(labels.len(), 2);
        assert_eq!(labels.tracked().count(), 2);

        let blank = LabelMap::from_pairs(&["Sage", "Grape"], &["", "Deep work"]);
        assert_eq!(blank.label("Sage"), Some(""));
        assert_eq!(blank.tracked().count(), 1);
    }

    #[test]
    fn test_repeated_color_keeps_first_slot_and_last_label() {
        let labels = LabelMap::from_pairs(&["Sage", "Grape", "Sage"], &["Meetings", "Deep work", "Calls"]);
        let entries: Vec<_> = labels.iter().collect();
        assert_eq!(entries, vec![("Sage", "Calls"), ("Grape", "Deep work")]);
    }

    #[test]
    fn test_resolve_labeled_unlabeled_and_unknown() {
        let palette = palette();
        assert_eq!(
            palette.resolve("2"),
            LabelResolution::Labeled {
                color: "Sage".to_string(),
                label: "Meetings".to_string()
            }
        );
        assert_eq!(palette.resolve("1"), LabelResolution::Unlabeled { color: "Lavender".to_string() });
        assert_eq!(palette.resolve("7"), LabelResolution::Unlabeled { color: "Peacock".to_string() });
        assert_eq!(palette.resolve("0"), LabelResolution::Unlabeled { color: "Default".to_string() });
        assert_eq!(palette.resolve("42"), LabelResolution::UnknownTag);
        assert_eq!(palette.resolve("42").label(), "");
    }

    #[test]
    fn test_gaps_are_reported_by_kind() {
        let palette = palette();
        assert_eq!(palette.gap("0"), None);
        assert_eq!(palette.gap("2"), None);
        // Lavender has a deliberately empty label
        assert_eq!(palette.gap("1"), None);
        assert_eq!(
            palette.gap("7"),
            Some(ReportError::MissingColorOrLabelMapping {
                kind: MappingKind::Label,
                key: "Peacock".to_string()
            })
        );
        assert_eq!(
            palette.gap("11"),
            Some(ReportError::MissingColorOrLabelMapping {
                kind: MappingKind::Label,
                key: "Tomato".to_string()
            })
        );
        assert_eq!(
            palette.gap("42"),
            Some(ReportError::MissingColorOrLabelMapping {
                kind: MappingKind::Color,
                key: "42".to_string()
            })
        );
    }

    #[test]
    fn test_gap_is_not_fatal() {
        let gap = palette().gap("42").unwrap();
        assert!(!gap.is_fatal());
        assert_eq!(gap.to_string(), "No color mapping for '42'");
    }
}
