use aex_core::scene::match_names as mn;
use aex_core::scene::{AvAttributes, Layer, PropertyValue};
use aex_core::{get, update, GetOptions, Project, SceneRef, UpdateOptions};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn synthetic_project(comps: usize, layers: usize) -> Project {
    let mut project = Project::new();
    let plate = project.add_solid("Plate", AvAttributes::default(), vec![0.5, 0.5, 0.5]);
    for c in 0..comps {
        let comp = project.add_comp(&format!("Comp {}", c + 1), AvAttributes::default());
        for l in 0..layers {
            let mut layer = Layer::av(&format!("Layer {}", l + 1), Some(plate), 10.0);
            if let Some(position) = layer
                .root
                .group_mut(mn::TRANSFORM)
                .and_then(|t| t.property_mut(mn::POSITION))
            {
                for k in 0..4 {
                    let x = (k * 100) as f64;
                    let _ = position.set_value_at_time(k as f64, PropertyValue::Vector(vec![x, x, 0.0]));
                }
            }
            if let Some(effects) = layer.root.group_mut(mn::EFFECTS) {
                let _ = effects.add_property(mn::GAUSSIAN_BLUR);
            }
            let _ = project.comp_mut(comp).map(|c| c.add_layer(layer));
        }
    }
    project
}

fn get_project(c: &mut Criterion) {
    let project = synthetic_project(4, 25);

    c.bench_function("get_project_100_layers", |b| {
        b.iter(|| get(black_box(&project), &SceneRef::Project, GetOptions::default()))
    });
}

fn update_project(c: &mut Criterion) {
    let source = synthetic_project(4, 25);
    let doc = serde_json::to_value(
        get(&source, &SceneRef::Project, GetOptions::default())
            .unwrap()
            .object,
    )
    .unwrap();

    c.bench_function("update_empty_project_100_layers", |b| {
        b.iter(|| {
            let mut project = Project::new();
            update(
                &mut project,
                &SceneRef::Project,
                black_box(doc.clone()),
                UpdateOptions::default(),
            )
        })
    });
}

criterion_group!(benches, get_project, update_project);
criterion_main!(benches);
