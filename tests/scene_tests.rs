// End-to-end tests: CSV tables through schema mapping, scene assembly and picking

use profile_map_canvas::components::trait_map::pick::pick;
use profile_map_canvas::components::trait_map::radar::radar_series;
use profile_map_canvas::components::trait_map::scale::ScreenScale;
use profile_map_canvas::components::trait_map::scene::{Scene, SceneOptions};
use profile_map_canvas::components::trait_map::schema::parse_graph;
use profile_map_canvas::components::trait_map::{GraphData, GraphLink, GraphNode};

// ============================================================================
// Scene Assembly
// ============================================================================

#[test]
fn test_two_node_cluster_has_edge_but_no_ellipse() {
	let data = GraphData {
		nodes: vec![
			GraphNode::new("A", 0.0, 0.0).with_cluster("1"),
			GraphNode::new("B", 10.0, 10.0).with_cluster("1"),
		],
		links: vec![GraphLink::new("A", "B", 2.0)],
	};
	let scene = Scene::assemble(&data, &SceneOptions::default());

	assert_eq!(scene.segments.len(), 1);
	let seg = scene.segments[0];
	assert_eq!((seg.x1, seg.y1, seg.x2, seg.y2, seg.weight), (0.0, 0.0, 10.0, 10.0, 2.0));
	assert!(scene.ellipses.is_empty());
	assert_eq!(scene.cluster_colors.len(), 1);
}

#[test]
fn test_scene_from_csv_tables() {
	let nodes = "user_id,x,y,cluster,visual,auditory\n\
	             a,0,0,1,9,1\n\
	             b,1,0,1,5,\n\
	             c,0,1,1,1,3\n\
	             d,5,5,null,2,2\n\
	             e,,3,2,4,4\n";
	let edges = "source,target,weight\n\
	             a,b,0.5\n\
	             b,c,n/a\n\
	             c,zz,1\n\
	             e,a,1\n";
	let data = parse_graph(nodes, edges).unwrap();
	assert_eq!(data.nodes.len(), 5);
	assert_eq!(data.links.len(), 4);

	let scene = Scene::assemble(&data, &SceneOptions::default());
	let weights: Vec<f64> = scene.segments.iter().map(|s| s.weight).collect();
	assert_eq!(weights, [0.5, 1.0]);
	assert_eq!(scene.points.len(), 4);
	assert_eq!(scene.ellipses.len(), 1);
	assert_eq!(scene.ellipses[0].cluster, "1");
	let keys: Vec<&str> = scene.cluster_colors.keys().map(String::as_str).collect();
	assert_eq!(keys, ["1", "2"]);
}

// ============================================================================
// Interaction
// ============================================================================

#[test]
fn test_click_selects_node_and_feeds_radar() {
	let data = GraphData {
		nodes: vec![
			GraphNode::new("origin", 0.0, 0.0),
			GraphNode::new("target", 10.0, 10.0).with_trait("auditory", 6.0),
			GraphNode::new("far", 100.0, 100.0),
		],
		links: vec![],
	};
	let scene = Scene::assemble(&data, &SceneOptions::default());
	let scale = ScreenScale::new(scene.extent, 800.0, 600.0);
	let (sx, sy) = scale.to_screen(10.0, 10.0);

	let picked = pick(&data.nodes, &scale, sx, sy);
	assert_eq!(picked, Some("target"));

	let series = radar_series(picked.and_then(|id| data.node(id)));
	assert_eq!(series[1].label, "Auditory");
	assert_eq!(series[1].value, 6.0);
	assert_eq!(series.iter().filter(|p| p.value == 0.0).count(), 7);
}
