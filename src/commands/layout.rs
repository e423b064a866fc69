use anyhow::Result;

use uploadfiles::domain::services::layout_for;
use uploadfiles::domain::value_objects::Artifact;

pub fn cmd_layout(artifact: &Artifact, layout: &str, json: bool) -> Result<()> {
    let layout = layout_for(layout)?;
    let path = layout.path_of(artifact);

    if json {
        super::emit_json(&serde_json::json!({
            "layout": layout.id(),
            "artifact": artifact.to_string(),
            "path": path,
        }))?;
    } else {
        println!("{}", path);
    }
    Ok(())
}
