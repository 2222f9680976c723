use tonic::{Request, Response, Status};

use crate::datastore::Datastore;
use crate::operations::get_user_history::get_user_history;
use crate::operations::get_user_recognition_for_course::get_user_recognition_for_course;
use crate::operations::get_user_recognitions::get_user_recognitions;
use crate::operations::record_chapter_seen::record_chapter_seen;
use crate::pb::progress_service_server::{ProgressService, ProgressServiceServer};
use crate::pb::{
    GetUserHistoryInput, GetUserHistoryOutput, GetUserRecognitionForCourseInput, GetUserRecognitionForCourseOutput,
    GetUserRecognitionsInput, GetUserRecognitionsOutput, RecordChapterSeenInput, RecordChapterSeenOutput,
};

pub struct ProgressServiceImpl<D: Datastore> {
    datastore: D,
}

impl<D: Datastore + 'static> ProgressServiceImpl<D> {
    pub fn new(datastore: D) -> Self {
        ProgressServiceImpl { datastore }
    }

    pub fn into_server(self) -> ProgressServiceServer<Self> {
        ProgressServiceServer::new(self)
    }
}

#[tonic::async_trait]
impl<D: Datastore + 'static> ProgressService for ProgressServiceImpl<D> {
    async fn record_chapter_seen(
        &self,
        request: Request<RecordChapterSeenInput>,
    ) -> Result<Response<RecordChapterSeenOutput>, Status> {
        record_chapter_seen(&self.datastore, request.into_inner())
            .await
            .map(Response::new)
            .map_err(|err| err.into())
    }

    async fn get_user_history(
        &self,
        request: Request<GetUserHistoryInput>,
    ) -> Result<Response<GetUserHistoryOutput>, Status> {
        get_user_history(&self.datastore, request.into_inner())
            .await
            .map(Response::new)
            .map_err(|err| err.into())
    }

    async fn get_user_recognitions(
        &self,
        request: Request<GetUserRecognitionsInput>,
    ) -> Result<Response<GetUserRecognitionsOutput>, Status> {
        get_user_recognitions(&self.datastore, request.into_inner())
            .await
            .map(Response::new)
            .map_err(|err| err.into())
    }

    async fn get_user_recognition_for_course(
        &self,
        request: Request<GetUserRecognitionForCourseInput>,
    ) -> Result<Response<GetUserRecognitionForCourseOutput>, Status> {
        get_user_recognition_for_course(&self.datastore, request.into_inner())
            .await
            .map(Response::new)
            .map_err(|err| err.into())
    }
}
