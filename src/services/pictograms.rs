use crate::domain::pictogram::Pictogram;
use crate::domain::types::{CategoryId, Ownership, PictogramId, Scope, UserId};
use crate::dto::pictograms::{PictogramDto, PictogramWithCategoriesDto};
use crate::forms::pictograms::{AddPictogramFormPayload, UpdatePictogramFormPayload};
use crate::models::config::PictogramUpdatePolicy;
use crate::repository::{
    AssociationReader, CategoryReader, HiddenPictogramReader, OwnerFilter, PictogramReader,
    PictogramWriter,
};
use crate::services::authorization::{CatalogAction, authorize};
use crate::services::hidden::filter_hidden;
use crate::services::visibility::{
    ResolutionMode, categories_for_pictogram, pictograms_for_category, require_visible_pictogram,
    visible_pictograms,
};

use super::{ServiceError, ServiceResult};

fn create_pictogram<R>(
    payload: AddPictogramFormPayload,
    owner: Ownership,
    repo: &R,
) -> ServiceResult<PictogramDto>
where
    R: PictogramWriter,
{
    let pictogram = payload.to_new_pictogram(owner);
    match repo.create_pictogram(&pictogram, &payload.category_ids) {
        Ok(created) => {
            log::info!("Created {owner} pictogram {}", created.id);
            Ok(created.into())
        }
        Err(e) => {
            log::error!("Failed to create pictogram: {e}");
            Err(e.into())
        }
    }
}

/// Create a general pictogram through the anonymous catalog endpoint.
pub fn create_general_pictogram<R>(
    payload: AddPictogramFormPayload,
    repo: &R,
) -> ServiceResult<PictogramDto>
where
    R: PictogramWriter,
{
    create_pictogram(payload, Ownership::General, repo)
}

/// Create a pictogram private to `caller`, linked in the caller's scope.
pub fn create_user_pictogram<R>(
    payload: AddPictogramFormPayload,
    caller: UserId,
    repo: &R,
) -> ServiceResult<PictogramDto>
where
    R: PictogramWriter,
{
    create_pictogram(payload, Ownership::OwnedBy(caller), repo)
}

fn get_pictogram<R>(pictogram_id: PictogramId, repo: &R) -> ServiceResult<Pictogram>
where
    R: PictogramReader,
{
    match repo.get_pictogram_by_id(pictogram_id) {
        Ok(Some(pictogram)) => Ok(pictogram),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get pictogram: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Update a pictogram's fields and replace its categories.
///
/// Categories are replaced in the caller's scope. When `policy` lets a
/// caller edit another user's private pictogram, its owner's scope is used
/// instead, since the caller's view cannot hold it.
pub fn update_pictogram<R>(
    payload: UpdatePictogramFormPayload,
    caller: UserId,
    policy: PictogramUpdatePolicy,
    repo: &R,
) -> ServiceResult<PictogramDto>
where
    R: PictogramReader + PictogramWriter,
{
    let pictogram = get_pictogram(payload.pictogram_id, repo)?;
    authorize(
        CatalogAction::UpdatePictogram(policy),
        pictogram.owner,
        caller,
    )?;

    let scope = if pictogram.owner.is_visible_to(Some(caller)) {
        Scope::OwnedBy(caller)
    } else {
        pictogram.owner
    };

    match repo.update_pictogram(
        pictogram.id,
        &payload.to_update(),
        &payload.category_ids,
        scope,
    ) {
        Ok(updated) => Ok(updated.into()),
        Err(e) => {
            log::error!("Failed to update pictogram {}: {e}", pictogram.id);
            Err(e.into())
        }
    }
}

pub fn delete_pictogram<R>(pictogram_id: PictogramId, caller: UserId, repo: &R) -> ServiceResult<()>
where
    R: PictogramReader + PictogramWriter,
{
    let pictogram = get_pictogram(pictogram_id, repo)?;
    authorize(CatalogAction::DeletePictogram, pictogram.owner, caller)?;

    match repo.delete_pictogram(pictogram.id) {
        Ok(_) => {
            log::info!("User {caller} deleted pictogram {}", pictogram.id);
            Ok(())
        }
        Err(e) => {
            log::error!("Failed to delete pictogram {}: {e}", pictogram.id);
            Err(e.into())
        }
    }
}

/// Pictogram detail with the categories visible to the viewer.
pub fn show_pictogram<R>(
    pictogram_id: PictogramId,
    viewer: Option<UserId>,
    repo: &R,
) -> ServiceResult<PictogramWithCategoriesDto>
where
    R: PictogramReader + AssociationReader + CategoryReader,
{
    let pictogram = require_visible_pictogram(pictogram_id, viewer, repo)?;
    let categories = categories_for_pictogram(pictogram.id, viewer, repo)?;
    Ok(PictogramWithCategoriesDto::new(pictogram, categories))
}

/// Flat listing of every pictogram the viewer can see. Authenticated
/// viewers do not get their hidden pictograms back.
pub fn show_pictograms<R>(viewer: Option<UserId>, repo: &R) -> ServiceResult<Vec<PictogramDto>>
where
    R: PictogramReader + HiddenPictogramReader,
{
    let pictograms = visible_pictograms(viewer, repo)?;
    let pictograms = match viewer {
        Some(user_id) => filter_hidden(user_id, pictograms, repo)?,
        None => pictograms,
    };
    Ok(pictograms.into_iter().map(PictogramDto::from).collect())
}

/// Pictograms of one category as held in the viewer's own scope.
pub fn show_pictograms_by_category<R>(
    category_id: CategoryId,
    viewer: Option<UserId>,
    repo: &R,
) -> ServiceResult<Vec<PictogramDto>>
where
    R: CategoryReader + AssociationReader + PictogramReader,
{
    let pictograms = pictograms_for_category(category_id, viewer, ResolutionMode::UserOnly, repo)?;
    Ok(pictograms.into_iter().map(PictogramDto::from).collect())
}

/// Look up pictograms by id, in request order. Unknown ids and pictograms the
/// viewer cannot see are skipped.
pub fn show_pictograms_by_ids<R>(
    ids: &[PictogramId],
    viewer: Option<UserId>,
    repo: &R,
) -> ServiceResult<Vec<PictogramDto>>
where
    R: PictogramReader,
{
    let found = repo.get_pictograms_by_ids(ids)?;
    Ok(ids
        .iter()
        .filter_map(|id| found.iter().find(|p| p.id == *id))
        .filter(|p| p.owner.is_visible_to(viewer))
        .cloned()
        .map(PictogramDto::from)
        .collect())
}

/// Names of all general pictograms, in creation order.
pub fn general_pictogram_names<R>(repo: &R) -> ServiceResult<Vec<String>>
where
    R: PictogramReader,
{
    match repo.list_pictograms(OwnerFilter::General) {
        Ok(pictograms) => Ok(pictograms
            .into_iter()
            .map(|p| p.name.into_inner())
            .collect()),
        Err(e) => {
            log::error!("Failed to list general pictograms: {e}");
            Err(ServiceError::Internal)
        }
    }
}
