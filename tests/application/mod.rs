mod orchestrator_test;
mod upload_service_test;
