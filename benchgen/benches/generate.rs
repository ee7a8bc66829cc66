use benchgen::{
    template::{Bindings, Template},
    BenchmarkSpec, Operation, SizeRange, TemplateRegistry,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn generate(c: &mut Criterion) {
    let name = |s: &str| format!("generate::{s}");

    // Template parsing is only done once per process, but it should stay cheap
    c.bench_function(&name("template/parse"), |b| {
        b.iter(|| {
            Template::parse(
                black_box("main"),
                black_box("template <int> struct ${element} { };\n${instance}"),
            )
        })
    });
    c.bench_function(&name("registry/builtins"), |b| {
        b.iter(TemplateRegistry::with_builtins)
    });

    let template = Template::parse("main", "template <int> struct ${element} { };").unwrap();
    let bindings = Bindings::new().bind("element", 42usize);
    c.bench_function(&name("template/render"), |b| {
        b.iter(|| template.render(black_box(&bindings)))
    });

    c.bench_function(&name("size_range"), |b| {
        b.iter(|| black_box("0..=100:10, 150, 200").parse::<SizeRange>())
    });

    // Whole files, small and large
    for (operation, variant, breadth, depth, variety) in [
        (Operation::Map, "mpl_vector", 1, 10, 1),
        (Operation::Map, "mpl_vector", 10, 200, 1),
        (Operation::Foldl, "fusion_cons", 10, 100, 1),
        (Operation::TypeFoldl, "hana_typelist", 10, 100, 5),
        (Operation::ValueFoldl, "fusion_list", 10, 10, 5),
        (Operation::Sum, "mpl11_variadic_foldl", 10, 500, 1),
    ] {
        let spec = BenchmarkSpec::new(operation, variant, breadth, depth).with_variety(variety);
        c.bench_function(
            &name(&format!(
                "file/{operation}/{variant}/b{breadth}_d{depth}_v{variety}"
            )),
            |b| b.iter(|| black_box(&spec).generate()),
        );
    }
}

criterion_group!(benches, generate);
criterion_main!(benches);
