use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use itu_compliance::ToleranceConfig;
use itu_compliance::engine::{AdministrationCodes, SuspensionScreen, match_networks};
use itu_compliance::models::{FilingDate, Network, PlannedStatus};

const ADMINISTRATIONS: [&str; 4] = ["USA", "F", "G", "CHN"];

fn synthetic_networks(count: usize) -> Vec<Network> {
    (0..count)
        .map(|i| {
            let year = 1970 + (i % 50) as i32;
            Network {
                name: format!("NET-{}", i),
                administration: ADMINISTRATIONS[i % ADMINISTRATIONS.len()].to_string(),
                longitude: (i as f64 * 0.37) % 360.0 - 180.0,
                status: if i % 3 == 0 {
                    PlannedStatus::Planned
                } else {
                    PlannedStatus::NonPlanned
                },
                brought_into_use: Some(FilingDate {
                    raw: format!("{}-01-01", year + 5),
                    year: year + 5,
                }),
                early_stage_filing: Some(FilingDate {
                    raw: format!("{}-01-01", year),
                    year,
                }),
            }
        })
        .collect()
}

fn bench_match_networks(c: &mut Criterion) {
    let tolerances = ToleranceConfig::default();
    let codes = AdministrationCodes::from_cells(["USA", "G"]);
    let mut screen = SuspensionScreen::default();
    screen.excluded.insert("NET-4".to_string());

    let mut group = c.benchmark_group("match_networks");
    for count in [1_000, 10_000, 50_000] {
        let networks = synthetic_networks(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &networks, |b, networks| {
            b.iter(|| {
                match_networks(
                    black_box(100.0),
                    black_box(networks),
                    &codes,
                    &screen,
                    &tolerances,
                )
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_match_networks);
criterion_main!(benches);
