use criterion::{black_box, criterion_group, criterion_main, Criterion};
use shadenet_api_core::{Bsdf, Spectrum};
use shadenet_graph_core::{EngineConfig, GraphContext, MaterialGraph, NodeRegistry, ShadingPoint};
use shadenet_resources_core::TextureManager;
use shadenet_test_fixtures::materials;

fn bench_fixture(c: &mut Criterion, name: &str, fold_constants: bool) {
    let registry = NodeRegistry::with_builtins();
    let textures = TextureManager::new("texture");
    let config = EngineConfig {
        fold_constants,
        ..Default::default()
    };
    let ctx = GraphContext::new(&registry, &textures, &config);

    let text = materials::text(name).expect("fixture text");
    let (mut graph, _) = match materials::format(name).expect("fixture format") {
        shadenet_test_fixtures::Format::Xml => MaterialGraph::from_xml(&text, ctx),
        shadenet_test_fixtures::Format::Json => MaterialGraph::from_json(&text, ctx),
    }
    .expect("fixture parses");
    graph.prepare(&ctx);

    let points: Vec<ShadingPoint> = (0..256)
        .map(|i| ShadingPoint::at_uv((i % 16) as f32 / 16.0, (i / 16) as f32 / 16.0))
        .collect();
    let label = if fold_constants {
        format!("update_bsdf/{name}")
    } else {
        format!("update_bsdf/{name}/unfolded")
    };
    c.bench_function(&label, |b| {
        let mut bsdf = Bsdf::new();
        b.iter(|| {
            for sp in &points {
                bsdf.clear();
                graph.update_bsdf(&mut bsdf, Spectrum::WHITE, black_box(sp));
                black_box(bsdf.len());
            }
        })
    });
}

fn bench_update_bsdf(c: &mut Criterion) {
    bench_fixture(c, "lambert-grey", true);
    bench_fixture(c, "layered-plastic", true);
    bench_fixture(c, "layered-plastic", false);
    bench_fixture(c, "checker-floor", true);
    bench_fixture(c, "self-reference", true);
}

criterion_group!(benches, bench_update_bsdf);
criterion_main!(benches);
