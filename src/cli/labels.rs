//! Labels command handler.

use color_eyre::Result;

use crate::config::Config;
use crate::context::Context;
use crate::di::FromRef;
use crate::models::EntityId;
use crate::repositories::LabelRepository;

use super::App;

impl App {
    /// Print `<id>\t<label>` per entity, `-` when no label exists.
    pub async fn run_labels(&self, entities: &[String]) -> Result<()> {
        let config = Config::load()?;
        let items = entities
            .iter()
            .map(|e| EntityId::normalize(e).map(Some))
            .collect::<Result<Vec<_>, _>>()?;

        let ctx = Context::from_config(config)?;
        let labels = LabelRepository::from_ref(&ctx).labels(&items).await?;

        for id in items.iter().flatten() {
            let label = labels.get(id).map(String::as_str).unwrap_or("-");
            println!("{}\t{}", id, label);
        }
        Ok(())
    }
}
