//! Reconcile step for objects generated from an ArgoCD instance
//!
//! The reconcile loop builds default objects and hands each one to
//! [`reconcile_object`], which applies the registered hooks before the object
//! reaches the cluster.

mod reconcile;

pub use reconcile::{
    reconcile_object, set_controller_reference, Context, KubeObjectClient, ObjectClient,
    ObjectManifest,
};
