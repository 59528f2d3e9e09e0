use crate::SchemaOpts;
use anyhow::Context;
use ic_vc_flow::config::VcFlowConfig;
use schemars::schema_for;

pub(crate) fn schema(o: &SchemaOpts) -> anyhow::Result<()> {
    let schema = schema_for!(VcFlowConfig);
    let nice_schema =
        serde_json::to_string_pretty(&schema).context("Failed to produce pretty schema.")?;
    if let Some(outfile) = &o.outfile {
        std::fs::write(outfile, nice_schema)
            .with_context(|| format!("Failed to write schema to {}.", outfile.to_string_lossy()))?;
    } else {
        println!("{}", nice_schema);
    }
    Ok(())
}
