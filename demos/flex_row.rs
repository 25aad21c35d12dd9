use color_eyre::eyre::Result;
use glam::Vec3;
use spatial_flexbox::{
	bounds::Bounds,
	direction::Justify,
	DummySpatial, Flexbox, FlexboxSettings, SpatialNode,
};

fn main() -> Result<()> {
	color_eyre::install()?;
	tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.init();

	let panel = DummySpatial::new(Bounds::new(0.8, 0.6, 0.02));
	for _ in 0..7 {
		let card = DummySpatial::new(Bounds::new(0.18, 0.12, 0.01));
		panel.add_child(&card);
	}

	let mut flexbox = Flexbox::new(
		panel.clone(),
		FlexboxSettings {
			wrap: true,
			justify: Justify::Center,
			gap: [0.02, 0.02].into(),
			..Default::default()
		},
	);
	flexbox.update()?;

	for (i, card) in panel.children()?.iter().enumerate() {
		let position = Vec3::from(card.position()?);
		println!("card {i}: {position}");
	}
	Ok(())
}
