pub mod resource_loader;
