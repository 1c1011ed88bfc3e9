//! Interception-side wiring.
//!
//! An interception layer owns one [`GenericMetaDataAdvisor`] per concern.
//! For every intercepted call the advisor resolves the method's metadata and
//! hands it to its [`MetaDataInterceptor`]; [`GenericMetaDataAdvisor::matches`]
//! lets the layer skip calls that carry no relevant metadata at all.

use crate::collector::{AnnotationMetaDataCollector, GenericMetaDataCollector};
use crate::config::{InheritanceConfiguration, ResolutionSettings};
use crate::errors::{Error, Result};
use crate::hierarchy::{MethodInvocation, MethodRef, TypeModel, TypeName};
use crate::metadata::{AnnotationFlavor, MetaDataFlavor};
use std::sync::Arc;

/// Behaviour applied to an intercepted call, given its resolved metadata.
pub trait MetaDataInterceptor<M>: Send + Sync {
    type Output;

    fn intercept(&self, invocation: &MethodInvocation, metadata: &[M]) -> anyhow::Result<Self::Output>;
}

/// Advisor over [`Annotation`](crate::metadata::Annotation)s.
pub type AnnotationMetaDataAdvisor<I> = GenericMetaDataAdvisor<AnnotationFlavor, I>;

pub struct GenericMetaDataAdvisor<F: MetaDataFlavor, I> {
    collector: Arc<GenericMetaDataCollector<F>>,
    interceptor: I,
}

impl<F, I> GenericMetaDataAdvisor<F, I>
where
    F: MetaDataFlavor,
    I: MetaDataInterceptor<F::Datum>,
{
    pub fn builder() -> GenericMetaDataAdvisorBuilder<F, I> {
        GenericMetaDataAdvisorBuilder {
            interceptor: None,
            collector: None,
            default_collector: None,
            settings: ResolutionSettings::default(),
        }
    }

    /// Resolve the invocation's metadata and run the interceptor on it.
    pub fn invoke(&self, invocation: &MethodInvocation) -> anyhow::Result<I::Output> {
        let metadata = self.collector.get_method_operating_metadata_for(invocation)?;
        self.interceptor.intercept(invocation, &metadata)
    }

    /// Whether calls to `method` on `target_type` carry any metadata this
    /// advisor is interested in.
    pub fn matches(&self, method: &MethodRef, target_type: &TypeName) -> Result<bool> {
        let metadata = self
            .collector
            .get_method_operating_metadata(method, target_type)?;
        Ok(!metadata.is_empty())
    }

    pub fn collector(&self) -> &Arc<GenericMetaDataCollector<F>> {
        &self.collector
    }

    pub fn interceptor(&self) -> &I {
        &self.interceptor
    }
}

pub struct GenericMetaDataAdvisorBuilder<F: MetaDataFlavor, I> {
    interceptor: Option<I>,
    collector: Option<Arc<GenericMetaDataCollector<F>>>,
    default_collector: Option<Arc<GenericMetaDataCollector<F>>>,
    settings: ResolutionSettings,
}

impl<F, I> GenericMetaDataAdvisorBuilder<F, I>
where
    F: MetaDataFlavor,
    I: MetaDataInterceptor<F::Datum>,
{
    pub fn interceptor(mut self, interceptor: I) -> Self {
        self.interceptor = Some(interceptor);
        self
    }

    pub fn collector(mut self, collector: Arc<GenericMetaDataCollector<F>>) -> Self {
        self.collector = Some(collector);
        self
    }

    pub fn intercepting_metadata<K, S>(mut self, kinds: K) -> Self
    where
        K: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.settings.intercepting_metadata = Some(kinds.into_iter().map(Into::into).collect());
        self
    }

    pub fn inheritance(mut self, inheritance: InheritanceConfiguration) -> Self {
        self.settings.inheritance = inheritance;
        self
    }

    /// Validate the wiring and push this advisor's settings into the
    /// collector, which discards its cached results.
    pub fn build(self) -> Result<GenericMetaDataAdvisor<F, I>> {
        let interceptor = self.interceptor.ok_or_else(|| {
            Error::Configuration("metadata advisor requires an interceptor".into())
        })?;
        let collector = self.collector.or(self.default_collector).ok_or_else(|| {
            Error::Configuration(
                "metadata advisor requires a collector or a type model for the default collector"
                    .into(),
            )
        })?;

        collector.apply_settings(self.settings);
        Ok(GenericMetaDataAdvisor {
            collector,
            interceptor,
        })
    }
}

impl<I> GenericMetaDataAdvisorBuilder<AnnotationFlavor, I>
where
    I: MetaDataInterceptor<crate::metadata::Annotation>,
{
    /// Use an annotation collector over `model` unless an explicit collector
    /// is given.
    pub fn type_model(mut self, model: Arc<TypeModel>) -> Self {
        self.default_collector = Some(Arc::new(AnnotationMetaDataCollector::from_model(model)));
        self
    }
}
