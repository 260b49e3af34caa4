use criterion::{black_box, criterion_group, criterion_main, Criterion};
use langgraph_core::StateGraph;
use serde_json::json;

fn linear_graph_invoke_benchmark(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("linear graph invoke", |b| {
        b.to_async(&runtime).iter(|| async {
            let mut graph = StateGraph::new();

            graph.add_node("step1", |mut state| {
                Box::pin(async move {
                    if let Some(obj) = state.as_object_mut() {
                        let value = obj.get("value").and_then(|v| v.as_i64()).unwrap_or(0);
                        obj.insert("value".to_string(), json!(value + 1));
                    }
                    Ok(state)
                })
            });
            graph.add_node("step2", |mut state| {
                Box::pin(async move {
                    if let Some(obj) = state.as_object_mut() {
                        let value = obj.get("value").and_then(|v| v.as_i64()).unwrap_or(0);
                        obj.insert("value".to_string(), json!(value * 2));
                    }
                    Ok(state)
                })
            });

            graph.add_edge("__start__", "step1");
            graph.add_edge("step1", "step2");
            graph.add_edge("step2", "__end__");

            let compiled = graph.compile().unwrap();
            let result = compiled.invoke(black_box(json!({ "value": 5 }))).await.unwrap();
            black_box(result);
        });
    });
}

fn fan_out_fan_in_benchmark(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("fan-out fan-in invoke", |b| {
        b.to_async(&runtime).iter(|| async {
            let mut graph = StateGraph::new();

            graph.add_node("dispatch", |state| Box::pin(async move { Ok(state) }));
            for name in ["branch_a", "branch_b", "branch_c"] {
                graph.add_node(name, |state| Box::pin(async move { Ok(state) }));
                graph.add_edge("dispatch", name);
                graph.add_edge(name, "join");
            }
            graph.add_node("join", |state| Box::pin(async move { Ok(state) }));

            graph.add_edge("__start__", "dispatch");
            graph.add_edge("join", "__end__");

            let compiled = graph.compile().unwrap();
            let result = compiled.invoke(black_box(json!({ "value": 0 }))).await.unwrap();
            black_box(result);
        });
    });
}

criterion_group!(benches, linear_graph_invoke_benchmark, fan_out_fan_in_benchmark);
criterion_main!(benches);
