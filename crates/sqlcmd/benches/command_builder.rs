use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sqlcmd::{CommandBuilder, MappingDescriptor, PropertyMapping, SqlCommand};

/// A row of `n` integer columns; column 0 is the primary key.
#[derive(Clone)]
struct Row {
    cols: Vec<i64>,
}

fn build_builder(n: usize) -> CommandBuilder<Row> {
    let mut descriptor = MappingDescriptor::<Row>::builder("t");
    for i in 0..n {
        let mut property = PropertyMapping::new(format!("col{i}"))
            .reader(move |r: &Row| r.cols[i]);
        if i == 0 {
            property = property.primary_key();
        }
        descriptor = descriptor.property(property);
    }
    CommandBuilder::new(descriptor.build().expect("valid mapping"))
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("command_builder/insert");

    for n in [2, 5, 10, 50] {
        let builder = build_builder(n);
        let row = Row {
            cols: (1..=n as i64).collect(),
        };
        group.bench_with_input(BenchmarkId::from_parameter(n), &row, |b, row| {
            let mut cmd = SqlCommand::new();
            b.iter(|| {
                builder.insert_command(&mut cmd, row).unwrap();
                black_box(&cmd);
            });
        });
    }

    group.finish();
}

fn bench_update_and_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("command_builder/update_positional");

    for n in [2, 5, 10, 50] {
        let builder = build_builder(n);
        let row = Row {
            cols: (1..=n as i64).collect(),
        };
        group.bench_with_input(BenchmarkId::from_parameter(n), &row, |b, row| {
            let mut cmd = SqlCommand::new();
            b.iter(|| {
                builder.update_command(&mut cmd, row).unwrap();
                black_box(cmd.to_positional('@').unwrap());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_insert, bench_update_and_render);
criterion_main!(benches);
