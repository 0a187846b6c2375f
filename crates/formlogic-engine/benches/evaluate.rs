//! Resolve + validate benchmark
//!
//! Runs on every answer change in the form UI, so it has to stay well under
//! a frame budget even for long forms.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use formlogic_common::{
    AnswerSet, DependencyRule, FieldDefinition, FieldType, FieldValidation, FormSchema, TextFormat,
};
use formlogic_engine::{resolve_visibility, validate_form, FormEngine};

/// `size` fields where every odd field depends on the previous one
fn chained_form(size: usize) -> (FormSchema, AnswerSet) {
    let mut fields = Vec::with_capacity(size);
    let mut answers = AnswerSet::new();

    for i in 0..size {
        let id = format!("f{i}");
        let field = if i % 2 == 0 {
            answers.insert(id.clone(), "Sim");
            FieldDefinition::new(&id, FieldType::Select, format!("Question {i}"))
                .with_options(["Sim", "Não"])
                .required()
        } else {
            answers.insert(id.clone(), format!("user{i}@example.com"));
            FieldDefinition::new(&id, FieldType::Text, format!("Detail {i}"))
                .required()
                .with_logic(DependencyRule::equals(format!("f{}", i - 1), "Sim"))
                .with_validations(FieldValidation {
                    format: Some(TextFormat::Email),
                    max_length: Some(64),
                    ..Default::default()
                })
        };
        fields.push(field);
    }

    (FormSchema::from_fields(fields), answers)
}

fn resolve_and_validate_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_validate");

    for size in [10, 100, 1000].iter() {
        let (schema, answers) = chained_form(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let visibility = resolve_visibility(black_box(&schema.fields), black_box(&answers));
                black_box(validate_form(&schema.fields, &answers, &visibility, &[]))
            })
        });
    }

    group.finish();
}

fn engine_benchmark(c: &mut Criterion) {
    let engine = FormEngine::default();
    let (schema, answers) = chained_form(100);

    c.bench_function("engine_evaluate_100", |b| {
        b.iter(|| black_box(engine.evaluate(black_box(&schema), black_box(&answers))))
    });
}

criterion_group!(benches, resolve_and_validate_benchmark, engine_benchmark);
criterion_main!(benches);
