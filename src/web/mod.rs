pub mod site_generator;
