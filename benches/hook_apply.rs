//! Criterion benchmarks for reconciler hook application
//!
//! Every generated object goes through the full hook sequence once per
//! reconcile, so apply cost scales with both hook count and object count.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use k8s_openapi::api::apps::v1::{Deployment, DeploymentSpec};
use k8s_openapi::api::rbac::v1::ClusterRole;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

use argocd_hooks::crd::{ArgoCD, ArgoCDSpec};
use argocd_hooks::hooks::{typed_hook, HookRegistry};

// =============================================================================
// Test Fixtures
// =============================================================================

fn deployment() -> Deployment {
    Deployment {
        metadata: ObjectMeta {
            name: Some("argocd-server".to_string()),
            namespace: Some("argocd".to_string()),
            ..Default::default()
        },
        spec: Some(DeploymentSpec::default()),
        ..Default::default()
    }
}

/// Registry with `count` hooks, alternating between Deployment and
/// ClusterRole handlers so half of them are no-ops for any object.
fn registry_with(count: usize) -> HookRegistry {
    let registry = HookRegistry::new();
    for i in 0..count {
        if i % 2 == 0 {
            registry.register(typed_hook(
                format!("deployment-{i}"),
                move |_: &ArgoCD, d: &mut Deployment| {
                    d.metadata
                        .labels
                        .get_or_insert_with(Default::default)
                        .insert(format!("hook-{i}"), "applied".to_string());
                    Ok(())
                },
            ));
        } else {
            registry.register(typed_hook(
                format!("cluster-role-{i}"),
                |_: &ArgoCD, role: &mut ClusterRole| {
                    role.rules.get_or_insert_with(Vec::new);
                    Ok(())
                },
            ));
        }
    }
    registry
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_apply(c: &mut Criterion) {
    let owner = ArgoCD::new("argocd", ArgoCDSpec::default());
    let mut group = c.benchmark_group("hook_apply");

    for count in [0usize, 1, 10, 100] {
        let registry = registry_with(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| {
                let mut deploy = deployment();
                registry
                    .apply(black_box(&owner), black_box(&mut deploy))
                    .unwrap();
                deploy
            });
        });
    }

    group.finish();
}

fn bench_register(c: &mut Criterion) {
    c.bench_function("register_100", |b| {
        b.iter(|| black_box(registry_with(100)));
    });
}

criterion_group!(benches, bench_apply, bench_register);
criterion_main!(benches);
