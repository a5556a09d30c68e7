pub mod model_variograms;
