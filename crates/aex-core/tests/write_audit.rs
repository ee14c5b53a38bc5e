//! Write-path audit: `create` and `update` against a live project.
//!
//! Run with: cargo test -p aex-core --test write_audit

use aex_core::scene::match_names as mn;
use aex_core::scene::{AvAttributes, ItemId, ItemKind, Layer, PropertyValue};
use aex_core::{
    create, get, update, AexError, GetOptions, MatchBy, MismatchBehavior, Project, SceneRef,
    UpdateOptions,
};
use serde_json::{json, Value};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn read(project: &Project, target: &SceneRef) -> Value {
    let result = get(project, target, GetOptions::default()).unwrap();
    serde_json::to_value(&result.object).unwrap()
}

fn layer_names(project: &Project, comp: ItemId) -> Vec<String> {
    project
        .comp(comp)
        .unwrap()
        .layers()
        .iter()
        .map(|l| l.name.clone())
        .collect()
}

mod matching {
    use super::*;

    fn comp_with_nulls(names: &[&str]) -> (Project, ItemId) {
        let mut project = Project::new();
        let comp = project.add_comp("Main", AvAttributes::default());
        for name in names {
            project.comp_mut(comp).unwrap().add_layer(Layer::null(name, 10.0));
        }
        (project, comp)
    }

    #[test]
    fn test_one_fewer_layer_leaves_the_trailing_layer() {
        init_tracing();
        let (mut project, comp) = comp_with_nulls(&["A", "B", "C"]);
        let doc = json!({
            "type": "aex:item:av:comp",
            "name": "Main",
            "layers": [
                { "type": "aex:layer:null", "name": "B" },
                { "type": "aex:layer:null", "name": "A" }
            ]
        });

        let result = update(&mut project, &SceneRef::Item(comp), doc, UpdateOptions::default())
            .unwrap();

        // Index matching: document layer 1 lands on live layer 1, by position.
        assert_eq!(layer_names(&project, comp), ["B", "A", "C"]);
        assert_eq!(result.stats.comp_count, 1);
        assert_eq!(result.stats.layer_count, 2);
        assert_eq!(project.undo_history(), ["AEX: Update aex:item:av:comp"]);
    }

    #[test]
    fn test_extra_document_layers_are_created() {
        let (mut project, comp) = comp_with_nulls(&["A"]);
        let doc = json!({
            "type": "aex:item:av:comp",
            "layers": [
                { "type": "aex:layer:null", "name": "A" },
                { "type": "aex:layer:null", "name": "New" }
            ]
        });
        update(&mut project, &SceneRef::Item(comp), doc, UpdateOptions::default()).unwrap();
        assert_eq!(layer_names(&project, comp), ["A", "New"]);
    }

    #[test]
    fn test_mismatched_layer_kind_is_rejected() {
        let (mut project, comp) = comp_with_nulls(&["A"]);
        let doc = json!({ "type": "aex:item:av:comp", "layers": [{ "type": "aex:layer:camera" }] });
        let err = update(&mut project, &SceneRef::Item(comp), doc, UpdateOptions::default())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Updating a 'aex:layer:null' from a 'aex:layer:camera' is not supported"
        );
        // The comp was matched before the layer failed; the bracket still closed.
        assert_eq!(project.undo_history().len(), 1);
    }

    #[test]
    fn test_project_items_by_name_survive_reordering() {
        let mut project = Project::new();
        let red = project.add_solid("Red", AvAttributes::default(), vec![1.0, 0.0, 0.0]);
        let blue = project.add_solid("Blue", AvAttributes::default(), vec![0.0, 0.0, 1.0]);
        let doc = json!({
            "type": "aex:project",
            "items": [
                { "type": "aex:item:av:footage:solid", "name": "Blue", "comment": "sky" },
                { "type": "aex:item:av:footage:solid", "name": "Red", "comment": "fire" }
            ]
        });
        let options = UpdateOptions {
            project_item_match_by: MatchBy::Name,
            ..UpdateOptions::default()
        };
        update(&mut project, &SceneRef::Project, doc, options).unwrap();

        assert_eq!(project.num_items(), 2);
        assert_eq!(project.item(red).unwrap().comment, "fire");
        assert_eq!(project.item(blue).unwrap().comment, "sky");
    }

    #[test]
    fn test_item_kind_mismatch_behaviors() {
        let doc = json!({
            "type": "aex:project",
            "items": [{ "type": "aex:item:folder", "name": "Assets" }]
        });
        let run = |behavior| {
            let mut project = Project::new();
            project.add_placeholder("Missing", AvAttributes::default());
            let options = UpdateOptions {
                project_item_mismatch_behavior: behavior,
                ..UpdateOptions::default()
            };
            let result = update(&mut project, &SceneRef::Project, doc.clone(), options);
            (project, result)
        };

        let (project, result) = run(MismatchBehavior::Create);
        assert!(result.is_ok());
        assert_eq!(project.num_items(), 2);

        let (project, result) = run(MismatchBehavior::Skip);
        assert_eq!(result.unwrap().log.len(), 1);
        assert_eq!(project.num_items(), 1);

        let (_, result) = run(MismatchBehavior::Error);
        assert!(matches!(result, Err(AexError::NotSupportedOperation(_))));
    }
}

mod creation {
    use super::*;

    #[test]
    fn test_folders_are_reused_across_calls() {
        let mut project = Project::new();
        let doc = json!({
            "type": "aex:item:av:footage:solid",
            "name": "Red",
            "folder": ["Solids", "Assets"],
            "color": [1.0, 0.0, 0.0]
        });
        create(&mut project, &SceneRef::Project, doc.clone(), UpdateOptions::default()).unwrap();
        create(&mut project, &SceneRef::Project, doc, UpdateOptions::default()).unwrap();

        let folders = project
            .items()
            .iter()
            .filter(|i| matches!(i.kind, ItemKind::Folder))
            .count();
        assert_eq!(folders, 2);
        assert_eq!(project.num_items(), 4);
        let solid = project.items().last().unwrap().id;
        assert_eq!(project.folder_path(solid).unwrap(), ["Solids", "Assets"]);
    }

    #[test]
    fn test_comp_with_sourced_layer() {
        init_tracing();
        let mut project = Project::new();
        create(
            &mut project,
            &SceneRef::Project,
            json!({ "type": "aex:item:av:footage:solid", "aexid": "bg:9", "name": "BG" }),
            UpdateOptions::default(),
        )
        .unwrap();
        let result = create(
            &mut project,
            &SceneRef::Project,
            json!({
                "type": "aex:item:av:comp",
                "name": "Main",
                "layers": [{ "type": "aex:layer:av", "source": "bg:1" }]
            }),
            UpdateOptions::default(),
        )
        .unwrap();
        assert!(result.log.is_empty());

        let comp = project.items()[1].id;
        let layer = project.layer(comp, 1).unwrap();
        assert_eq!(layer.name, "BG");
        assert_eq!(layer.av_layer().unwrap().source, Some(project.items()[0].id));
    }

    #[test]
    fn test_unresolved_source_is_logged() {
        let mut project = Project::new();
        let comp = project.add_comp("Main", AvAttributes::default());
        let result = create(
            &mut project,
            &SceneRef::Item(comp),
            json!({ "type": "aex:layer:av", "source": "gone:5" }),
            UpdateOptions::default(),
        )
        .unwrap();
        assert_eq!(result.log.len(), 1);
        assert!(result.log[0].message.contains("gone:5"));
        assert_eq!(project.layer(comp, 1).unwrap().av_layer().unwrap().source, None);
    }

    #[test]
    fn test_property_under_layer_sets_the_live_property() {
        let mut project = Project::new();
        let comp = project.add_comp("Main", AvAttributes::default());
        project.comp_mut(comp).unwrap().add_layer(Layer::null("Null 1", 10.0));

        let result = create(
            &mut project,
            &SceneRef::Layer { comp, index: 1 },
            json!({ "type": "aex:property:oned", "matchName": mn::OPACITY, "value": 25.0 }),
            UpdateOptions::default(),
        )
        .unwrap();
        assert_eq!(result.stats.property_count, 1);

        let opacity = project
            .layer(comp, 1)
            .unwrap()
            .root
            .find_property(mn::OPACITY)
            .unwrap();
        assert_eq!(opacity.value(), &PropertyValue::Number(25.0));
    }

    #[test]
    fn test_unsupported_combination_names_both_kinds() {
        let mut project = Project::new();
        let err = create(
            &mut project,
            &SceneRef::Project,
            json!({ "type": "aex:layer:null" }),
            UpdateOptions::default(),
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Creating a 'aex:layer:null' under a 'aex:project' is not supported"
        );
        assert!(project.undo_history().is_empty());
    }

    #[test]
    fn test_bad_documents_fail_before_any_mutation() {
        let mut project = Project::new();
        let cases = [
            (Value::Null, "Assertion"),
            (json!({ "name": "untyped" }), "Assertion"),
            (json!({ "type": "aex:renderqueue" }), "Unrecognized"),
        ];
        for (doc, kind) in cases {
            let err = create(&mut project, &SceneRef::Project, doc, UpdateOptions::default())
                .unwrap_err();
            let matches_kind = match kind {
                "Assertion" => matches!(err, AexError::Assertion(_)),
                _ => matches!(err, AexError::UnrecognizedType(_)),
            };
            assert!(matches_kind, "{err}");
        }
        assert!(project.undo_history().is_empty());
        assert_eq!(project.num_items(), 0);
    }
}

mod round_trip {
    use super::*;

    fn source_project() -> Project {
        let mut project = Project::new();
        let solid = project.add_solid("Plate", AvAttributes::default(), vec![0.2, 0.4, 0.6]);
        let comp = project.add_comp("Main", AvAttributes::default());
        project.comp_mut(comp).unwrap().work_area_start = 1.0;

        let mut layer = Layer::av("Plate", Some(solid), 10.0);
        layer.comment = "background".into();
        let transform = layer.root.group_mut(mn::TRANSFORM).unwrap();
        let position = transform.property_mut(mn::POSITION).unwrap();
        position
            .set_value_at_time(0.0, PropertyValue::Vector(vec![0.0, 0.0, 0.0]))
            .unwrap();
        position
            .set_value_at_time(2.0, PropertyValue::Vector(vec![960.0, 540.0, 0.0]))
            .unwrap();
        transform
            .property_mut(mn::OPACITY)
            .unwrap()
            .set_expression("wiggle(2, 10)")
            .unwrap();

        let slider = layer
            .root
            .group_mut(mn::EFFECTS)
            .unwrap()
            .add_property(mn::SLIDER_CONTROL)
            .unwrap();
        slider
            .property_mut("ADBE Slider Control-0001")
            .unwrap()
            .set_value(PropertyValue::Number(12.5))
            .unwrap();
        layer
            .root
            .group_mut(mn::MASKS)
            .unwrap()
            .add_property(mn::MASK_ATOM)
            .unwrap();

        project.comp_mut(comp).unwrap().add_layer(layer);
        project.comp_mut(comp).unwrap().add_layer(Layer::null("Rig", 10.0));
        project.layer_mut(comp, 1).unwrap().parent = Some(2);
        project
    }

    #[test]
    fn test_project_document_is_reproduced() {
        init_tracing();
        let original = read(&source_project(), &SceneRef::Project);

        let mut rebuilt = Project::new();
        update(
            &mut rebuilt,
            &SceneRef::Project,
            original.clone(),
            UpdateOptions::default(),
        )
        .unwrap();

        assert_eq!(read(&rebuilt, &SceneRef::Project), original);
    }

    #[test]
    fn test_reapplying_a_document_changes_nothing() {
        let mut project = source_project();
        let before = read(&project, &SceneRef::Project);
        update(
            &mut project,
            &SceneRef::Project,
            before.clone(),
            UpdateOptions::default(),
        )
        .unwrap();
        assert_eq!(read(&project, &SceneRef::Project), before);
        assert_eq!(project.num_items(), 2);
    }
}
