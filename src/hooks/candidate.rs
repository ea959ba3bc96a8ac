//! Type-erased candidate objects
//!
//! A candidate is any Kubernetes object under construction during a
//! reconciliation pass. Hooks receive it as `&mut dyn Candidate` and decide
//! for themselves whether they handle its concrete type.

use std::any::Any;
use std::borrow::Cow;

use kube::Resource;

/// A mutable object handed to reconciler hooks.
///
/// Implemented for every statically typed Kubernetes resource: all
/// `k8s-openapi` objects and every `#[derive(CustomResource)]` type.
pub trait Candidate: Any {
    /// Kind of the object (e.g. `Deployment`)
    fn object_kind(&self) -> Cow<'static, str>;

    /// `metadata.name` of the object, if set
    fn object_name(&self) -> Option<&str>;

    /// Upcast for read-only type checks
    fn as_any(&self) -> &dyn Any;

    /// Upcast for in-place mutation
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T> Candidate for T
where
    T: Resource<DynamicType = ()> + Any,
{
    fn object_kind(&self) -> Cow<'static, str> {
        <T as Resource>::kind(&())
    }

    fn object_name(&self) -> Option<&str> {
        Resource::meta(self).name.as_deref()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl<'a> dyn Candidate + 'a {
    /// Returns true if the candidate is a `T`
    pub fn is<T: Candidate>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Borrow the candidate as a `T`, or `None` if it is another type
    pub fn downcast_ref<T: Candidate>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Mutably borrow the candidate as a `T`, or `None` if it is another type
    ///
    /// This is how hooks dispatch on object type: act on `Some`, return
    /// `Ok(())` untouched on `None`.
    pub fn downcast_mut<T: Candidate>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}
