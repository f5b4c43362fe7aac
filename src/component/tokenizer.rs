//! Components that tokenize the message text.
//!
//! All tokenizer components tolerate an absent user dictionary: the tokenizer
//! simply falls back to plain word segmentation.

use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use super::{Component, ComponentConfig, TOKENS, parse_config, to_metadata};
use crate::analysis::tokenizer::regex::DEFAULT_PATTERN;
use crate::analysis::tokenizer::{
    RegexTokenizer, Tokenizer, UnicodeWordTokenizer, UserDictTokenizer, WhitespaceTokenizer,
};
use crate::error::Result;
use crate::message::Message;

/// Name of the whitespace tokenizer component.
pub const WHITESPACE: &str = "tokenizer_whitespace";
/// Name of the Unicode word tokenizer component.
pub const UNICODE: &str = "tokenizer_unicode";
/// Name of the regex tokenizer component.
pub const REGEX: &str = "tokenizer_regex";
/// Name of the user dictionary tokenizer component.
pub const USER_DICT: &str = "tokenizer_user_dict";

/// Options shared by the tokenizer components. Each reads only its own keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    /// Token pattern for `tokenizer_regex`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Emit the text between pattern matches instead of the matches
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub gaps: bool,
    /// User word list file or directory for `tokenizer_user_dict`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_dicts: Option<String>,
}

/// A component that sets `message.tokens` with a [`Tokenizer`].
pub struct TokenizerComponent {
    name: &'static str,
    tokenizer: Box<dyn Tokenizer>,
    config: TokenizerConfig,
    user_words: Option<usize>,
}

impl std::fmt::Debug for TokenizerComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenizerComponent")
            .field("name", &self.name)
            .field("tokenizer", &self.tokenizer.name())
            .field("config", &self.config)
            .field("user_words", &self.user_words)
            .finish()
    }
}

impl TokenizerComponent {
    /// Wrap an existing tokenizer under a component name.
    pub fn new(name: &'static str, tokenizer: Box<dyn Tokenizer>, config: TokenizerConfig) -> Self {
        TokenizerComponent {
            name,
            tokenizer,
            config,
            user_words: None,
        }
    }

    /// Build `tokenizer_whitespace`.
    pub fn whitespace(_config: &ComponentConfig) -> Result<Box<dyn Component>> {
        Ok(Box::new(Self::new(
            WHITESPACE,
            Box::new(WhitespaceTokenizer::new()),
            TokenizerConfig::default(),
        )))
    }

    /// Build `tokenizer_unicode`.
    pub fn unicode(_config: &ComponentConfig) -> Result<Box<dyn Component>> {
        Ok(Box::new(Self::new(
            UNICODE,
            Box::new(UnicodeWordTokenizer::new()),
            TokenizerConfig::default(),
        )))
    }

    /// Build `tokenizer_regex` from its `pattern` and `gaps` options.
    pub fn regex(config: &ComponentConfig) -> Result<Box<dyn Component>> {
        let config: TokenizerConfig = parse_config(REGEX, config)?;
        let pattern = config.pattern.as_deref().unwrap_or(DEFAULT_PATTERN);
        let tokenizer = if config.gaps {
            RegexTokenizer::with_gaps(pattern)?
        } else {
            RegexTokenizer::with_pattern(pattern)?
        };
        let config = TokenizerConfig {
            pattern: config.pattern,
            gaps: config.gaps,
            user_dicts: None,
        };
        Ok(Box::new(Self::new(REGEX, Box::new(tokenizer), config)))
    }

    /// Build `tokenizer_user_dict` from its `user_dicts` option.
    pub fn user_dict(config: &ComponentConfig) -> Result<Box<dyn Component>> {
        let config: TokenizerConfig = parse_config(USER_DICT, config)?;
        let tokenizer = UserDictTokenizer::from_path(config.user_dicts.as_deref().map(Path::new))?;
        let config = TokenizerConfig {
            user_dicts: config.user_dicts,
            ..Default::default()
        };
        let user_words = tokenizer.dictionary().map(|d| d.len());
        let mut component = Self::new(USER_DICT, Box::new(tokenizer), config);
        component.user_words = user_words;
        Ok(Box::new(component))
    }

    /// The options this component was built with.
    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }
}

impl Component for TokenizerComponent {
    fn name(&self) -> &'static str {
        self.name
    }

    fn provides(&self) -> &'static [&'static str] {
        &[TOKENS]
    }

    fn process(&self, message: &mut Message) -> Result<()> {
        let tokens: Vec<_> = self.tokenizer.tokenize(&message.text)?.collect();
        debug!("{} produced {} tokens", self.name, tokens.len());
        message.set_tokens(tokens);
        Ok(())
    }

    fn persist(&self) -> Result<ComponentConfig> {
        to_metadata(self.name, &self.config)
    }

    fn dictionary_size(&self) -> Option<usize> {
        self.user_words
    }
}
