pub mod trait_map;
