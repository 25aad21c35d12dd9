use color_eyre::eyre::Result;
use glam::Vec3;
use spatial_flexbox::{
	bounds::Bounds,
	DummySpatial, Flexbox, FlexboxSettings, FlexItemSettings, SpatialNode,
};
use std::time::Duration;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
	color_eyre::install()?;
	tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.init();

	let toolbar = DummySpatial::new(Bounds::new(1.0, 0.25, 0.02));
	let label = DummySpatial::new(Bounds::new(0.2, 0.2, 0.01));
	let spacer = DummySpatial::new(Bounds::new(0.2, 0.2, 0.01));
	toolbar.add_child(&label);
	toolbar.add_child(&spacer);

	// pretend the label's glyph model streams in from disk
	let loaded = label.loading_model();
	tokio::task::spawn(async move {
		tokio::time::sleep(Duration::from_millis(50)).await;
		let _ = loaded.send(());
	});

	let mut flexbox = Flexbox::new(toolbar.clone(), FlexboxSettings::default());
	flexbox.set_item_settings(
		&spacer,
		FlexItemSettings {
			grow: true,
			..Default::default()
		},
	);
	flexbox.layout_when_loaded().await?;

	for (name, node) in [("label", &label), ("spacer", &spacer)] {
		let position = Vec3::from(node.position()?);
		let scale = Vec3::from(node.scale()?);
		println!("{name}: position {position} scale {scale}");
	}
	Ok(())
}
