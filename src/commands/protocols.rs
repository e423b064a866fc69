use anyhow::Result;

use uploadfiles::infrastructure::TransportRegistry;

pub fn cmd_protocols(json: bool) -> Result<()> {
    let registry = TransportRegistry::with_defaults();

    if json {
        super::emit_json(&serde_json::json!({ "protocols": registry.schemes() }))?;
    } else {
        for scheme in registry.schemes() {
            println!("{}", scheme);
        }
    }
    Ok(())
}
