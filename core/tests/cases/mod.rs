mod analytics;
mod scoring;
