// Student details endpoint

use tracing::debug;

use crate::client::RecordsClient;
use crate::error::Error;
use crate::models::StudentDetails;

impl RecordsClient {
    /// Fetch one student's record for one session.
    ///
    /// `GET /student/details?regNo={reg_no}&session={session}`, both values
    /// percent-encoded. A non-2xx answer is [`Error::Rejected`] with no
    /// detail: this endpoint has no structured error body.
    pub async fn student_details(
        &self,
        reg_no: &str,
        session: &str,
    ) -> Result<StudentDetails, Error> {
        let mut url = self.endpoint("student/details")?;
        url.query_pairs_mut()
            .append_pair("regNo", reg_no)
            .append_pair("session", session);

        debug!("GET {}", url);

        let resp = self
            .http()
            .get(url)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            debug!(status = status.as_u16(), "details request rejected");
            return Err(Error::Rejected {
                status: status.as_u16(),
                detail: None,
            });
        }

        self.decode(resp).await
    }
}
