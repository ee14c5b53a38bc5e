//! Whole-project encode/decode.
//!
//! An update runs in three passes: non-comp items (which fills the source
//! table), then every comp's own attributes, then every comp's layers. Layers
//! can therefore reference any item or comp in the same document regardless
//! of order.

use crate::comp::{apply_comp_layers, create_comp, encode_comp, update_comp};
use crate::error::AexError;
use crate::item::{create_item, encode_item, item_type};
use crate::matching::pair;
use crate::normalize::{modified, modified_num};
use crate::options::MismatchBehavior;
use crate::scene::{ItemId, ItemKind, Project};
use crate::state::{AexState, LogEntry, LogLevel};
use aex_data::model::AexProject;

fn comp_ids(project: &Project) -> Vec<ItemId> {
    project
        .items()
        .iter()
        .filter(|i| matches!(i.kind, ItemKind::Comp(_)))
        .map(|i| i.id)
        .collect()
}

fn non_comp_ids(project: &Project) -> Vec<ItemId> {
    project
        .items()
        .iter()
        .filter(|i| !matches!(i.kind, ItemKind::Comp(_)))
        .map(|i| i.id)
        .collect()
}

fn names(project: &Project, ids: &[ItemId]) -> Vec<String> {
    ids.iter()
        .filter_map(|id| project.item(*id).ok())
        .map(|i| i.name.clone())
        .collect()
}

pub fn encode_project(project: &Project, state: &mut AexState) -> Result<AexProject, AexError> {
    let d = Project::default();
    tracing::debug!(items = project.num_items(), "encode project");

    let items = non_comp_ids(project)
        .into_iter()
        .map(|id| encode_item(project, id))
        .collect::<Result<Vec<_>, _>>()?;
    let comps = comp_ids(project)
        .into_iter()
        .map(|id| encode_comp(project, id, state))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(AexProject {
        bits_per_channel: modified(project.bits_per_channel, d.bits_per_channel),
        expression_engine: modified(project.expression_engine.clone(), d.expression_engine),
        linear_blending: modified(project.linear_blending, d.linear_blending),
        linearize_working_space: modified(
            project.linearize_working_space,
            d.linearize_working_space,
        ),
        working_gamma: modified_num(project.working_gamma, d.working_gamma),
        working_space: modified(project.working_space.clone(), d.working_space),
        display_start_frame: modified(project.display_start_frame, d.display_start_frame),
        time_display_type: modified(project.time_display_type, d.time_display_type),
        items,
        comps,
        ..AexProject::default()
    })
}

fn apply_project_attributes(project: &mut Project, doc: &AexProject) {
    macro_rules! assign {
        ($($field:ident),* $(,)?) => {
            $(if let Some(v) = &doc.$field { project.$field = v.clone(); })*
        };
    }
    assign!(
        bits_per_channel, expression_engine, linear_blending, linearize_working_space,
        working_gamma, working_space, display_start_frame, time_display_type,
    );
}

fn update_items(project: &mut Project, doc: &AexProject, state: &mut AexState) -> Result<(), AexError> {
    let existing = non_comp_ids(project);
    let incoming: Vec<String> = doc.items.iter().map(|i| i.name.clone()).collect();
    let pairs = pair(&names(project, &existing), &incoming, state.update_options.project_item_match_by);

    for (item, target) in doc.items.iter().zip(pairs) {
        let Some(id) = target.map(|i| existing[i]) else {
            create_item(project, item, state)?;
            continue;
        };

        let live = item_type(project, id)?;
        if live == item.kind {
            crate::item::update_item(project, id, item, state)?;
            continue;
        }
        match state.update_options.project_item_mismatch_behavior {
            MismatchBehavior::Create => {
                create_item(project, item, state)?;
            }
            MismatchBehavior::Skip => {
                let message = format!(
                    "Skipped '{}': existing item is a '{}', not a '{}'",
                    item.name,
                    live.tag(),
                    item.kind.tag()
                );
                tracing::info!("{message}");
                state.log.push(LogEntry {
                    level: LogLevel::Info,
                    message,
                    match_name: None,
                });
            }
            MismatchBehavior::Error => {
                return Err(AexError::cannot_update(live.tag(), item.kind.tag()));
            }
        }
    }
    Ok(())
}

/// Applies a project document: attributes, items, comps, then layers.
pub fn update_project(project: &mut Project, doc: &AexProject, state: &mut AexState) -> Result<(), AexError> {
    apply_project_attributes(project, doc);
    update_items(project, doc, state)?;

    let existing = comp_ids(project);
    let incoming: Vec<String> = doc.comps.iter().map(|c| c.name.clone()).collect();
    let pairs = pair(
        &names(project, &existing),
        &incoming,
        state.update_options.project_item_match_by,
    );

    let mut targets = Vec::with_capacity(doc.comps.len());
    for (comp, target) in doc.comps.iter().zip(pairs) {
        let id = match target.map(|i| existing[i]) {
            Some(id) => {
                update_comp(project, id, comp, state)?;
                id
            }
            None => create_comp(project, comp, state)?,
        };
        targets.push(id);
    }

    for (comp, id) in doc.comps.iter().zip(targets) {
        apply_comp_layers(project, id, comp, state)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{MatchBy, UpdateOptions};
    use crate::scene::AvAttributes;
    use aex_data::model::{AexItem, ItemType};
    use serde_json::json;

    #[test]
    fn empty_project_keeps_its_collections() {
        let project = Project::new();
        let mut state = AexState::default();
        let out = encode_project(&project, &mut state).unwrap();
        assert_eq!(
            serde_json::to_value(&out).unwrap(),
            json!({ "type": "aex:project", "items": [], "comps": [] })
        );
    }

    #[test]
    fn layers_can_use_comps_defined_later() {
        let doc: AexProject = serde_json::from_value(json!({
            "type": "aex:project",
            "comps": [
                {
                    "type": "aex:item:av:comp",
                    "aexid": "main:1",
                    "name": "Main",
                    "layers": [{ "type": "aex:layer:av", "source": "pre:2" }]
                },
                { "type": "aex:item:av:comp", "aexid": "pre:2", "name": "Pre" }
            ]
        }))
        .unwrap();

        let mut project = Project::new();
        let mut state = AexState::default();
        update_project(&mut project, &doc, &mut state).unwrap();

        let main = project.items()[0].id;
        let pre = project.items()[1].id;
        let layer = project.layer(main, 1).unwrap();
        assert_eq!(layer.av_layer().unwrap().source, Some(pre));
        assert_eq!(layer.name, "Pre");
        assert_eq!(state.stats.comp_count, 2);
        assert!(state.log.is_empty());
    }

    fn solid_doc(name: &str) -> AexItem {
        AexItem {
            kind: ItemType::Solid,
            name: name.into(),
            ..AexItem::default()
        }
    }

    #[test]
    fn mismatched_kinds_follow_the_mismatch_behavior() {
        let doc = AexProject {
            items: vec![solid_doc("Thing")],
            ..AexProject::default()
        };

        for (behavior, items_after) in [
            (MismatchBehavior::Create, 2),
            (MismatchBehavior::Skip, 1),
            (MismatchBehavior::Error, 1),
        ] {
            let mut project = Project::new();
            project.add_placeholder("Thing", AvAttributes::default());
            let mut state = AexState::for_update(UpdateOptions {
                project_item_mismatch_behavior: behavior,
                ..UpdateOptions::default()
            });
            let result = update_project(&mut project, &doc, &mut state);
            assert_eq!(result.is_err(), behavior == MismatchBehavior::Error);
            assert_eq!(project.num_items(), items_after);
        }
    }

    #[test]
    fn name_matching_updates_the_right_item() {
        let mut project = Project::new();
        let a = project.add_solid("A", AvAttributes::default(), vec![0.0, 0.0, 0.0]);
        let b = project.add_solid("B", AvAttributes::default(), vec![0.0, 0.0, 0.0]);
        let mut doc_b = solid_doc("B");
        doc_b.color = Some(vec![1.0, 1.0, 1.0]);
        let doc = AexProject {
            items: vec![doc_b],
            ..AexProject::default()
        };
        let mut state = AexState::for_update(UpdateOptions {
            project_item_match_by: MatchBy::Name,
            ..UpdateOptions::default()
        });
        update_project(&mut project, &doc, &mut state).unwrap();

        assert_eq!(encode_item(&project, a).unwrap().color, None);
        assert_eq!(encode_item(&project, b).unwrap().color, Some(vec![1.0, 1.0, 1.0]));
    }
}
