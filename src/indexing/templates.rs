use crate::util::Address;
use log::info;
use std::collections::{BTreeMap, BTreeSet};

/// Data sources whose contracts are only indexed once a handler has
/// instantiated them for an address, such as a `VToken` after `MarketListed`.
#[derive(Debug, Default)]
pub struct DataSourceTemplates {
    instances: BTreeMap<String, BTreeSet<Address>>,
}

impl DataSourceTemplates {
    pub fn new() -> Self {
        DataSourceTemplates::default()
    }

    /// Registers `template` as a dynamic data source.
    pub fn declare(&mut self, template: &str) {
        self.instances.entry(template.to_string()).or_default();
    }

    pub fn create(&mut self, template: &str, address: &Address) {
        if self
            .instances
            .entry(template.to_string())
            .or_default()
            .insert(address.clone())
        {
            info!("created {} data source for {}", template, address);
        }
    }

    pub fn contains(&self, template: &str, address: &Address) -> bool {
        self.instances
            .get(template)
            .map(|addresses| addresses.contains(address))
            .unwrap_or(false)
    }

    pub fn is_template(&self, data_source: &str) -> bool {
        self.instances.contains_key(data_source)
    }

    /// Static data sources accept every address, templates only the ones created.
    pub fn accepts(&self, data_source: &str, address: &Address) -> bool {
        !self.is_template(data_source) || self.contains(data_source, address)
    }

    pub fn instances(&self, template: &str) -> impl Iterator<Item = &Address> {
        self.instances.get(template).into_iter().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_filter() -> anyhow::Result<()> {
        let vtoken: Address = "0x0000000000000000000000000000000000000aaa".parse()?;
        let mut templates = DataSourceTemplates::new();
        templates.declare("VToken");

        assert!(templates.accepts("Comptroller", &vtoken));
        assert!(!templates.accepts("VToken", &vtoken));

        templates.create("VToken", &vtoken);
        templates.create("VToken", &vtoken);
        assert!(templates.accepts("VToken", &vtoken));
        assert_eq!(1, templates.instances("VToken").count());
        Ok(())
    }
}
