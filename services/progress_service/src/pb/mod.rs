mod conversion;

tonic::include_proto!("progress_service");
