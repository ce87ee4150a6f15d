//! Template compilation.
//!
//! [`Engine::compile`] parses a template, evaluates each directive's provider
//! and stitches the decorated outputs back between the literal segments.
//!
//! # Evaluation
//! - Every directive gets a fresh provider instance from the registry
//! - With more than one directive, each one runs on its own scoped thread and
//!   sends `(segment index, text)` back over a channel; results are placed by
//!   index, so completion order never changes the output
//! - A provider whose `load` fails, or that panics, contributes nothing; the
//!   error is logged
//! - Decoration is styled with the modes the provider returned

use crate::core::{
    cache::ResultCache,
    config::Options,
    environment::Environment,
    style::Formatter,
    templates::{Directive, Segment, Template},
};
use crate::providers::{Context, Registry};
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc;
use std::thread;

pub struct Engine<'a> {
    registry: &'a Registry,
    formatter: Formatter,
    cache: &'a ResultCache,
    env: &'a Environment,
    sequential: bool,
}

impl<'a> Engine<'a> {
    pub fn new(
        registry: &'a Registry,
        formatter: Formatter,
        cache: &'a ResultCache,
        env: &'a Environment,
    ) -> Self {
        Self {
            registry,
            formatter,
            cache,
            env,
            sequential: false,
        }
    }

    pub fn sequential(mut self, sequential: bool) -> Self {
        self.sequential = sequential;
        self
    }

    /// Render `source` with provider `options`
    pub fn compile(&self, source: &str, options: &Options) -> String {
        let template = Template::parse(source, |name| self.registry.contains(name));
        let directives: Vec<(usize, &Directive)> = template.directives().collect();
        let mut outputs = vec![String::new(); template.segments().len()];

        if self.sequential || directives.len() <= 1 {
            for (index, directive) in directives {
                outputs[index] = self.evaluate(directive, options);
            }
        } else {
            let (sender, receiver) = mpsc::channel();
            thread::scope(|scope| {
                for &(index, directive) in &directives {
                    let sender = sender.clone();
                    scope.spawn(move || {
                        let text = self.evaluate(directive, options);
                        if sender.send((index, text)).is_err() {
                            log::error!("Result of provider '{}' was lost", directive.provider);
                        }
                    });
                }
            });
            drop(sender);
            for (index, text) in receiver {
                outputs[index] = text;
            }
        }

        template
            .segments()
            .iter()
            .zip(outputs)
            .map(|(segment, output)| match segment {
                Segment::Literal(text) => text.clone(),
                Segment::Directive(_) => output,
            })
            .collect()
    }

    /// Directive text; a panicking provider contributes nothing
    fn evaluate(&self, directive: &Directive, options: &Options) -> String {
        panic::catch_unwind(AssertUnwindSafe(|| self.run(directive, options))).unwrap_or_else(|_| {
            log::error!("Provider '{}' panicked, output dropped", directive.provider);
            String::new()
        })
    }

    fn run(&self, directive: &Directive, options: &Options) -> String {
        let Some(mut provider) = self.registry.create(&directive.provider) else {
            return String::new();
        };

        let ctx = Context::new(self.env, options, self.cache);
        if let Err(e) = provider.load(&ctx) {
            log::warn!("Unable to load provider '{}': {e}", directive.provider);
            return String::new();
        }

        let rendered = provider.render(&self.formatter);
        log::debug!("Provider {} output: {:?}", directive.provider, rendered.text);

        let formatter = self.formatter;
        let modes = rendered.modes;
        directive.decorate(rendered.text, &rendered.raw, &|text| formatter.format(text, &modes))
    }
}
