use crate::commands::CmdResult;
use crate::config::TagtableConfig;

pub fn run(config: &TagtableConfig) -> CmdResult {
    CmdResult::default().with_config(config.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_the_effective_config() {
        let config = TagtableConfig {
            delimiter: "+".into(),
            ..Default::default()
        };
        let result = run(&config);
        assert_eq!(result.config, Some(config));
        assert!(result.messages.is_empty());
    }
}
