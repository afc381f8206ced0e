pub mod cname_inspector;
pub mod diversity_analyzer;
pub mod domain_classifier;
pub mod fanout_resolver;
pub mod resolver_pool;

pub use cname_inspector::CnameInspector;
pub use diversity_analyzer::DiversityAnalyzer;
pub use domain_classifier::DomainClassifier;
pub use fanout_resolver::{FanoutResolver, FanoutResult};
pub use resolver_pool::ResolverPool;
