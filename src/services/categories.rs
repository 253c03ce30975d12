use crate::domain::category::Category;
use crate::domain::types::{CategoryId, Ownership, Scope, UserId};
use crate::dto::categories::{CategoryDto, CategoryWithPictogramsDto};
use crate::forms::categories::{
    AddCategoryFormPayload, SetCategoryPictogramsFormPayload, UpdateCategoryFormPayload,
};
use crate::repository::{
    AssociationReader, AssociationWriter, CategoryReader, CategoryWriter, HiddenPictogramReader,
    OwnerFilter, PictogramReader,
};
use crate::services::authorization::{CatalogAction, authorize};
use crate::services::hidden::filter_hidden;
use crate::services::visibility::{
    ResolutionMode, pictograms_for_category, require_visible_category, visible_categories,
};

use super::{ServiceError, ServiceResult};

fn create_category<R>(
    payload: AddCategoryFormPayload,
    owner: Ownership,
    repo: &R,
) -> ServiceResult<CategoryDto>
where
    R: CategoryWriter,
{
    let category = payload.to_new_category(owner);
    match repo.create_category(&category, &payload.pictogram_ids) {
        Ok(created) => {
            log::info!("Created {owner} category {}", created.id);
            Ok(created.into())
        }
        Err(e) => {
            log::error!("Failed to create category: {e}");
            Err(e.into())
        }
    }
}

/// Create a general category through the anonymous catalog endpoint.
pub fn create_general_category<R>(
    payload: AddCategoryFormPayload,
    repo: &R,
) -> ServiceResult<CategoryDto>
where
    R: CategoryWriter,
{
    create_category(payload, Ownership::General, repo)
}

/// Create a category private to `caller`, linked in the caller's scope.
pub fn create_user_category<R>(
    payload: AddCategoryFormPayload,
    caller: UserId,
    repo: &R,
) -> ServiceResult<CategoryDto>
where
    R: CategoryWriter,
{
    create_category(payload, Ownership::OwnedBy(caller), repo)
}

fn get_category<R>(category_id: CategoryId, repo: &R) -> ServiceResult<Category>
where
    R: CategoryReader,
{
    match repo.get_category_by_id(category_id) {
        Ok(Some(category)) => Ok(category),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get category: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Update a category's fields and replace its pictograms in the scope of the
/// category's owner.
pub fn update_category<R>(
    payload: UpdateCategoryFormPayload,
    caller: UserId,
    repo: &R,
) -> ServiceResult<CategoryDto>
where
    R: CategoryReader + CategoryWriter,
{
    let category = get_category(payload.category_id, repo)?;
    authorize(CatalogAction::UpdateCategory, category.owner, caller)?;

    match repo.update_category(
        category.id,
        &payload.to_update(),
        &payload.pictogram_ids,
        category.owner,
    ) {
        Ok(updated) => Ok(updated.into()),
        Err(e) => {
            log::error!("Failed to update category {}: {e}", category.id);
            Err(e.into())
        }
    }
}

pub fn delete_category<R>(category_id: CategoryId, caller: UserId, repo: &R) -> ServiceResult<()>
where
    R: CategoryReader + CategoryWriter,
{
    let category = get_category(category_id, repo)?;
    authorize(CatalogAction::DeleteCategory, category.owner, caller)?;

    match repo.delete_category(category.id) {
        Ok(_) => {
            log::info!("User {caller} deleted category {}", category.id);
            Ok(())
        }
        Err(e) => {
            log::error!("Failed to delete category {}: {e}", category.id);
            Err(e.into())
        }
    }
}

/// Replace the caller's own pictogram set of a visible category, leaving the
/// general graph and other users' scopes untouched. Returns the number of
/// associations now held in the caller's scope.
pub fn set_category_pictograms<R>(
    payload: SetCategoryPictogramsFormPayload,
    caller: UserId,
    repo: &R,
) -> ServiceResult<usize>
where
    R: CategoryReader + AssociationWriter,
{
    let category = require_visible_category(payload.category_id, Some(caller), repo)?;

    match repo.replace_category_pictograms(
        category.id,
        &payload.pictogram_ids,
        Scope::OwnedBy(caller),
    ) {
        Ok(linked) => {
            log::debug!(
                "Replaced pictograms of category {} for user {caller}",
                category.id
            );
            Ok(linked)
        }
        Err(e) => {
            log::error!(
                "Failed to replace pictograms of category {}: {e}",
                category.id
            );
            Err(e.into())
        }
    }
}

/// Category detail: the category with pictograms from the general graph and
/// the viewer's scope combined.
pub fn show_category<R>(
    category_id: CategoryId,
    viewer: Option<UserId>,
    repo: &R,
) -> ServiceResult<CategoryWithPictogramsDto>
where
    R: CategoryReader + AssociationReader + PictogramReader,
{
    let category = require_visible_category(category_id, viewer, repo)?;
    let pictograms = pictograms_for_category(category.id, viewer, ResolutionMode::Union, repo)?;
    Ok(CategoryWithPictogramsDto::new(category, pictograms))
}

/// The shared catalog as seen by anonymous callers.
pub fn show_general_catalog<R>(repo: &R) -> ServiceResult<Vec<CategoryWithPictogramsDto>>
where
    R: CategoryReader + AssociationReader + PictogramReader,
{
    visible_categories(None, repo)?
        .into_iter()
        .map(|category| -> ServiceResult<CategoryWithPictogramsDto> {
            let pictograms =
                pictograms_for_category(category.id, None, ResolutionMode::Union, repo)?;
            Ok(CategoryWithPictogramsDto::new(category, pictograms))
        })
        .collect()
}

/// The caller's main catalog listing.
///
/// Pictograms come from the caller's own scope only, with hidden pictograms
/// removed.
pub fn show_catalog<R>(caller: UserId, repo: &R) -> ServiceResult<Vec<CategoryWithPictogramsDto>>
where
    R: CategoryReader + AssociationReader + PictogramReader + HiddenPictogramReader,
{
    let viewer = Some(caller);
    visible_categories(viewer, repo)?
        .into_iter()
        .map(|category| -> ServiceResult<CategoryWithPictogramsDto> {
            let pictograms =
                pictograms_for_category(category.id, viewer, ResolutionMode::UserOnly, repo)?;
            let pictograms = filter_hidden(caller, pictograms, repo)?;
            Ok(CategoryWithPictogramsDto::new(category, pictograms))
        })
        .collect()
}

/// Categories privately owned by the caller.
pub fn show_user_categories<R>(caller: UserId, repo: &R) -> ServiceResult<Vec<CategoryDto>>
where
    R: CategoryReader,
{
    match repo.list_categories(OwnerFilter::OwnedBy(caller)) {
        Ok(categories) => Ok(categories.into_iter().map(CategoryDto::from).collect()),
        Err(e) => {
            log::error!("Failed to list categories: {e}");
            Err(ServiceError::Internal)
        }
    }
}
