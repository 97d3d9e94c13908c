use dynamic_connectivity::{DynamicConnectivity, FastDynamicGraph};

fn add_edge(g: &mut FastDynamicGraph, u: usize, v: usize) {
    println!("Adding edge from {} to {}", u, v);
    g.add_edge(u, v);
}

fn rem_edge(g: &mut FastDynamicGraph, u: usize, v: usize) {
    println!("Removing edge from {} to {}", u, v);
    g.remove_edge(u, v);
}

fn report(g: &mut FastDynamicGraph, u: usize, v: usize) {
    println!(
        "Is {} connected to {}? {} ({} component(s) total)",
        u,
        v,
        if g.is_connected(u, v) { "Yes" } else { "No" },
        g.component_count()
    );
}

fn main() {
    let mut g = FastDynamicGraph::new(10);
    for u in 0..9 {
        g.add_edge(u, u + 1);
    }
    println!("Created a path of length 10 (vertices 0 to 9)");
    report(&mut g, 0, 9);
    rem_edge(&mut g, 4, 5);
    report(&mut g, 0, 9);
    add_edge(&mut g, 0, 5);
    report(&mut g, 0, 9);
    rem_edge(&mut g, 0, 5);
    report(&mut g, 0, 9);
}
