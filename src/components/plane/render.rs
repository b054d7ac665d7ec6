use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use crate::layout::LayoutSurface;

const BACKGROUND: &str = "#1a1a2e";
const EDGE_COLOR: &str = "rgba(100, 180, 255, 0.7)";
const PALETTE: &[&str] = &["#93c464", "#c3073f", "#5e88a2", "#ffb142"];
const ARROW_SIZE: f64 = 6.0;

pub fn render(layout: &LayoutSurface, ctx: &CanvasRenderingContext2d) {
	let view = layout.view();
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, view.width, view.height);
	draw_edges(layout, ctx);
	draw_nodes(layout, ctx);
}

fn draw_edges(layout: &LayoutSurface, ctx: &CanvasRenderingContext2d) {
	let graph = layout.graph();
	ctx.set_stroke_style_str(EDGE_COLOR);
	ctx.set_fill_style_str(EDGE_COLOR);
	ctx.set_line_width(1.0);

	for edge in layout.edge_visuals().iter() {
		let (dx, dy) = (edge.x2 - edge.x1, edge.y2 - edge.y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}
		let radius = layout
			.node_visual(graph.edge(edge.edge).to())
			.map_or(layout.view().node_radius, |v| v.radius.value());

		let (ux, uy) = (dx / dist, dy / dist);
		let (tip_x, tip_y) = (edge.x2 - ux * radius, edge.y2 - uy * radius);
		let (back_x, back_y) = (tip_x - ux * ARROW_SIZE, tip_y - uy * ARROW_SIZE);
		ctx.begin_path();
		ctx.move_to(edge.x1, edge.y1);
		ctx.line_to(back_x, back_y);
		ctx.stroke();

		let (px, py) = (-uy * ARROW_SIZE * 0.5, ux * ARROW_SIZE * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	}
}

fn draw_nodes(layout: &LayoutSurface, ctx: &CanvasRenderingContext2d) {
	let hovered = layout.hovered();
	for node in layout.node_visuals().iter() {
		let radius = node.radius.value();
		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, radius, 0.0, 2.0 * PI);
		let color = node
			.fill
			.as_deref()
			.unwrap_or(PALETTE[node.node.index() % PALETTE.len()]);
		ctx.set_fill_style_str(color);
		ctx.fill();

		if hovered == Some(node.node) {
			ctx.begin_path();
			let _ = ctx.arc(node.x, node.y, radius + 2.0, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str("rgba(255, 255, 255, 0.7)");
			ctx.set_line_width(1.0);
			ctx.stroke();
		}
	}
}
